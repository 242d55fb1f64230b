/// Why an inbound webhook could not be mapped. Each variant names the
/// field that was missing or unusable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("missing payload")]
    MissingPayload,
    #[error("missing order body")]
    MissingBody,
    #[error("order body is empty")]
    EmptyBody,
    #[error("order body is not an order record: {0}")]
    MalformedBody(String),
    #[error("order has no customer")]
    MissingCustomer,
    #[error("order customer has no id")]
    MissingCustomerId,
    #[error("order has no line_items")]
    MissingLineItems,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    #[error("invalid event payload: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl MapperError {
    pub fn reason(&self) -> &InvalidInput {
        match self {
            MapperError::InvalidInput(reason) => reason,
        }
    }
}
