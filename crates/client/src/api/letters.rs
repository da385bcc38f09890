//! Cover letter generation.

use maicivy_shared::{ApiError, GeneratedLetters, LetterRequest, LetterType, PATH_LETTERS_GENERATE};

use crate::api_client::ApiClient;

impl ApiClient {
    /// Ask the backend to generate letters for `company_name`.
    ///
    /// Generation counts against the visitor's access; callers gate it on
    /// [`VisitorStatus::has_access`](maicivy_shared::VisitorStatus).
    pub async fn generate_letters(
        &self,
        company_name: &str,
        letter_type: LetterType,
    ) -> Result<GeneratedLetters, ApiError> {
        let request = LetterRequest {
            company_name: company_name.trim().to_string(),
            letter_type,
        };
        self.post_json(PATH_LETTERS_GENERATE, &request).await
    }
}
