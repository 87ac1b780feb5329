use serde::Serialize;

/// Uniform response wrapper: `{ success, data?, count?, message?, error? }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            count: None,
            message: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Envelope {
            count: Some(count),
            ..Envelope::data(items)
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: None,
            count: None,
            message: Some(message.into()),
            error: None,
        }
    }
}
