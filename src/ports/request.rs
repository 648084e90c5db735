//! Port for the HTTP collaborator supplying request parameters.

use crate::domain::RequestParams;
use serde_json::Value;

/// Read access to the four parameter containers of an incoming request.
///
/// Containers are JSON objects of string-or-primitive values. A container
/// the framework does not populate may be returned as `null`.
pub trait RequestSource {
    /// Query-string parameters.
    fn query(&self) -> &Value;

    /// Parsed request body.
    fn body(&self) -> &Value;

    /// Route path parameters.
    fn path_params(&self) -> &Value;

    /// Request headers.
    fn header(&self) -> &Value;

    /// Deep-copies the four containers into a raw snapshot.
    fn snapshot(&self) -> RequestParams {
        RequestParams::new(
            self.query().clone(),
            self.body().clone(),
            self.path_params().clone(),
            self.header().clone(),
        )
    }
}
