//! Parameter Binder
//!
//! Turns the captures of a successful [`MatchAttempt`] into
//! [`ExtractedParameter`]s and writes them into the request's [`UriInfo`]:
//! the flat value, plus the exact run of path segments the value came from.

use crate::path::{segment_index_of, segment_span};
use crate::template::ParamGroup;
use crate::{MatchAttempt, RouteError, UriInfo};

/// A parameter value located within the request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedParameter {
    pub name: String,
    /// Matched text, still percent-encoded
    pub raw_value: String,
    /// Index of the first segment the value starts in
    pub segment_index: usize,
    /// Number of segments the value spans
    pub segment_count: usize,
}

/// Extracts every parameter of `groups` from `attempt`, in group order
pub fn extract(
    groups: &[ParamGroup],
    attempt: &MatchAttempt<'_>,
) -> Result<Vec<ExtractedParameter>, RouteError> {
    let captures = attempt.captures().ok_or_else(|| {
        RouteError::inconsistency("parameters requested from an attempt that did not match")
    })?;
    let path = attempt.input_path();

    groups
        .iter()
        .map(|group| {
            let m = captures.get(group.group).ok_or_else(|| {
                RouteError::inconsistency(format!(
                    "capture group {} for parameter '{}' is not present in the match",
                    group.group, group.name
                ))
            })?;

            let raw_value = m.as_str();
            let offset = attempt.search_start() + m.start();

            Ok(ExtractedParameter {
                name: group.name.clone(),
                raw_value: raw_value.to_string(),
                segment_index: segment_index_of(path, 0, offset),
                segment_count: segment_span(raw_value),
            })
        })
        .collect()
}

/// Checks that every parameter lies within the request's segment list
///
/// Runs before anything is written, so a failing parameter leaves
/// `uri_info` untouched.
pub fn validate(params: &[ExtractedParameter], uri_info: &UriInfo) -> Result<(), RouteError> {
    let total = uri_info.path_segments(false).len();

    match params
        .iter()
        .find(|p| p.segment_index + p.segment_count > total)
    {
        Some(param) => {
            let end = param.segment_index + param.segment_count;
            tracing::error!(
                param = %param.name,
                segment_index = param.segment_index,
                segment_count = param.segment_count,
                total_segments = total,
                "Number of matched segments greater than actual"
            );
            Err(RouteError::inconsistency(format!(
                "Number of matched segments greater than actual: parameter '{}' spans segments {}..{} of {}",
                param.name, param.segment_index, end, total
            )))
        }
        None => Ok(()),
    }
}

/// Writes `params` into `uri_info`
///
/// Fails with [`RouteError::InternalInconsistency`], writing nothing, when a
/// parameter would reach past the request's segment list.
pub fn bind(params: &[ExtractedParameter], uri_info: &mut UriInfo) -> Result<(), RouteError> {
    validate(params, uri_info)?;

    for param in params {
        let range = param.segment_index..param.segment_index + param.segment_count;
        let encoded = uri_info.path_segments(false)[range.clone()].to_vec();
        let decoded = uri_info.path_segments(true)[range].to_vec();

        uri_info.add_encoded_path_parameter(&param.name, &param.raw_value);
        uri_info.add_path_parameter_segments(&param.name, encoded, decoded);
    }

    Ok(())
}

/// [`extract`] followed by [`bind`]
pub fn populate(
    groups: &[ParamGroup],
    attempt: &MatchAttempt<'_>,
    uri_info: &mut UriInfo,
) -> Result<(), RouteError> {
    let params = extract(groups, attempt)?;
    bind(&params, uri_info)
}
