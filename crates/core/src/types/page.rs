use crate::error::CoreError;

pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_OFFSET: usize = 0;

/// Validated pagination window. `offset` never exceeds `max_offset`.
///
/// `limit` has no ceiling of its own; the backend rejects sizes it cannot serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParameters {
    pub limit: usize,
    pub offset: usize,
    pub max_offset: usize,
}

impl PageParameters {
    /// Parses raw query-string values, falling back to the defaults when a
    /// value is absent or empty, then applies [`PageParameters::validate`].
    pub fn parse(
        limit: Option<&str>,
        offset: Option<&str>,
        max_offset: usize,
    ) -> Result<Self, CoreError> {
        let limit = parse_param("limit", limit, DEFAULT_LIMIT)?;
        let offset = parse_param("offset", offset, DEFAULT_OFFSET)?;
        Self::validate(limit, offset, max_offset)
    }

    pub fn validate(limit: usize, offset: usize, max_offset: usize) -> Result<Self, CoreError> {
        if offset > max_offset {
            return Err(CoreError::OffsetExceedsMaximum(max_offset));
        }
        Ok(Self {
            limit,
            offset,
            max_offset,
        })
    }
}

fn parse_param(name: &'static str, raw: Option<&str>, default: usize) -> Result<usize, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };
    raw.parse()
        .map_err(|_| CoreError::MalformedParameter(name, raw.to_string()))
}
