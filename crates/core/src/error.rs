use thiserror::Error;

use crate::model::CategoryError;
use crate::model::QuestionError;
use crate::model::SettingsError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
