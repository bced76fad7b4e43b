//! Reunify Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod encoder;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod workflow;

pub use types::{EncodedImage, FormState, ImageRole};
pub use encoder::{
    extract_base64_from_data_url, extract_mime_type_from_data_url, to_data_url,
    FALLBACK_MIME_TYPE,
};
pub use error::{Error, Result};
pub use gemini::{
    build_generation_request, endpoint_url, extract_error_message, parse_generation_response,
    GenerateContentRequest, API_KEY_HEADER, DEFAULT_IMAGE_MODEL, GEMINI_API_BASE_URL,
};
pub use prompts::{DEFAULT_PROMPT, MISSING_INPUT_MESSAGE, RESULT_PLACEHOLDER};
pub use workflow::{ImageGenerator, RequestOutcome, Submission, Workflow};
