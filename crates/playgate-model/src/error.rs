use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid playbook identifier '{value}': {reason}")]
    InvalidPlaybook { value: String, reason: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;
