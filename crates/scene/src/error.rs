use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown scene `{0}` (expected one of: {list})", list = crate::scenes::SceneKind::NAMES.join(", "))]
    UnknownScene(String),
}
