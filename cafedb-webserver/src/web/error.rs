use cafedb_application::error::{AppError, BError};
use cafedb_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::App(AppError::Business(BError::Parameter(err))) => match err {
                ParameterError::Credentials | ParameterError::Unauthorized => Status::Unauthorized,
                ParameterError::Forbidden => Status::Forbidden,
                ParameterError::Repo(RepoError::NotFound) => Status::NotFound,
                ParameterError::Repo(_) => Status::InternalServerError,
                _ => Status::BadRequest,
            },
            Self::App(AppError::Business(BError::Repo(RepoError::NotFound))) => Status::NotFound,
            Self::App(_) | Self::Other(_) => Status::InternalServerError,
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        AppError::from(err).into()
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &rocket::Request) -> response::Result<'o> {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("Error: {self}");
        } else {
            debug!("Responding with {status}: {self}");
        }
        Err(status)
    }
}
