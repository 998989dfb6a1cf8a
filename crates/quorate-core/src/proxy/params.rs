use serde_json::Value;

use super::{errors::ProxyError, methods::MethodPolicy};
use crate::wire::WireValue;

/// Drops trailing `null` arguments. Some backends reject explicit nulls for optional
/// parameters.
#[must_use]
pub fn trim_trailing_nulls(params: &[Value]) -> &[Value] {
    let end = params.iter().rposition(|v| !v.is_null()).map_or(0, |i| i + 1);
    &params[..end]
}

/// Decodes positional request arguments against a method policy.
///
/// Trailing nulls are trimmed first. Nothing here contacts a backend, so malformed
/// arguments fail the call before any fan-out.
///
/// # Errors
///
/// - [`ProxyError::TooManyArguments`] for extra positional arguments
/// - [`ProxyError::MissingArgument`] if a required argument is absent or `null`
/// - [`ProxyError::InvalidArgument`] if an argument violates its wire contract
pub fn decode_params(
    policy: &MethodPolicy,
    params: &[Value],
) -> Result<Vec<WireValue>, ProxyError> {
    let raw = trim_trailing_nulls(params);

    if raw.len() > policy.args.len() {
        return Err(ProxyError::TooManyArguments { max: policy.args.len() });
    }

    let mut decoded = Vec::with_capacity(raw.len());
    for (index, kind) in policy.args.iter().enumerate() {
        match raw.get(index) {
            Some(value) if value.is_null() && index < policy.required => {
                return Err(ProxyError::MissingArgument { index });
            }
            Some(value) => {
                let arg = kind
                    .decode(value.clone())
                    .map_err(|source| ProxyError::InvalidArgument { index, source })?;
                decoded.push(arg);
            }
            None if index < policy.required => return Err(ProxyError::MissingArgument { index }),
            None => break,
        }
    }
    Ok(decoded)
}

/// Encodes decoded arguments back to JSON for the backends, trailing nulls removed.
///
/// # Errors
///
/// Returns [`ProxyError::Internal`] if an argument cannot be serialized.
pub fn encode_params(args: &[WireValue]) -> Result<Vec<Value>, ProxyError> {
    let mut encoded = args
        .iter()
        .map(WireValue::to_json)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ProxyError::Internal(e.to_string()))?;
    let keep = trim_trailing_nulls(&encoded).len();
    encoded.truncate(keep);
    Ok(encoded)
}
