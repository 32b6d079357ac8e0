use {
    crate::{
        client::ClientId,
        object::{Interface, ObjectId},
    },
    std::error::Error,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client tried to invoke a non-existent method")]
    InvalidMethod,
    #[error("Client tried to access non-existent object {0}")]
    InvalidObject(ObjectId),
    #[error("The requested client {0} does not exist")]
    ClientDoesNotExist(ClientId),
    #[error("The client has already been disconnected")]
    Disconnected,
    #[error("Server tried to allocate more than 0x1_00_00_00 ids")]
    TooManyIds,
    #[error("The server object id is out of bounds")]
    ServerIdOutOfBounds,
    #[error("The object id is unknown")]
    UnknownId,
    #[error("The id is already in use")]
    IdAlreadyInUse,
    #[error("The client object id is out of bounds")]
    ClientIdOutOfBounds,
    #[error(transparent)]
    ObjectError(ObjectError),
    #[error(transparent)]
    LookupError(LookupError),
    #[error("Could not add object {0} to the client")]
    AddObjectError(ObjectId, #[source] Box<ClientError>),
}

impl ClientError {
    /// Returns the error of the object that rejected the request, if it has type `E`.
    pub fn object_error<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            ClientError::ObjectError(e) => e.error.downcast_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("An error occurred in a `{}`", .interface.name())]
pub struct ObjectError {
    pub interface: Interface,
    #[source]
    pub error: Box<dyn Error + 'static>,
}

#[derive(Debug, Error)]
#[error("There is no `{}` with id {}", .interface.name(), .id)]
pub struct LookupError {
    pub interface: Interface,
    pub id: ObjectId,
}
