use crate::store::StorageError;
use thiserror::Error;

/// 启动 / 运行期错误 (请求处理错误使用 `AppError`)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
