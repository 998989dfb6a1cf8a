use crate::{
    proxy::methods::{policy_for, MethodPolicy},
    types::JsonRpcRequest,
};

impl JsonRpcRequest {
    /// Validates the envelope before any backend call and returns the policy of the method.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidVersion`] if not JSON-RPC 2.0
    /// - [`ValidationError::InvalidMethod`] if the method name is empty or contains characters
    ///   other than ASCII alphanumerics and `_`
    /// - [`ValidationError::MethodNotAllowed`] if the method has no policy
    /// - [`ValidationError::InvalidParams`] if `params` is neither absent, `null` nor an array
    pub fn validate(&self) -> Result<&'static MethodPolicy, ValidationError> {
        if self.jsonrpc != "2.0" {
            return Err(ValidationError::InvalidVersion(self.jsonrpc.to_string()));
        }

        if self.method.is_empty() ||
            !self.method.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidMethod(self.method.clone()));
        }

        let policy = policy_for(&self.method)
            .ok_or_else(|| ValidationError::MethodNotAllowed(self.method.clone()))?;

        match &self.params {
            None | Some(serde_json::Value::Null | serde_json::Value::Array(_)) => Ok(policy),
            Some(_) => Err(ValidationError::InvalidParams),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid JSON-RPC version: {0}")]
    InvalidVersion(String),

    #[error("invalid method name: {0}")]
    InvalidMethod(String),

    #[error("the method {0} does not exist/is not available")]
    MethodNotAllowed(String),

    #[error("params must be an array")]
    InvalidParams,
}
