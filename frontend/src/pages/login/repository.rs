use std::rc::Rc;

use crate::api::{ApiClient, ApiError, SignInRequest};

#[derive(Clone)]
pub struct LoginRepository {
    api: Rc<ApiClient>,
}

impl Default for LoginRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String, ApiError> {
        self.api.sign_in(request).await
    }
}
