#[derive(Debug, Clone)]
pub enum PlacesServiceError {
    Internal(String),
}

impl std::fmt::Display for PlacesServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacesServiceError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}
