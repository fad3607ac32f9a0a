use dimergen::engine::config::Placement;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid placement format for '{0}'. Expected 'distance:angle:x,y,z' (e.g., '4.0:90:0,0,1').")]
    InvalidPlacementFormat(String),

    #[error("Invalid axis format for '{0}'. Expected three comma-separated numbers (e.g., '0,0,1').")]
    InvalidAxisFormat(String),

    #[error("Component '{component}' is not a number ('{value}') in '{input}'.")]
    InvalidNumber {
        component: &'static str,
        value: String,
        input: String,
    },

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

fn parse_component(value: &str, component: &'static str, input: &str) -> Result<f64, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component,
            input: input.to_string(),
        });
    }
    value.parse().map_err(|_| ParseError::InvalidNumber {
        component,
        value: value.to_string(),
        input: input.to_string(),
    })
}

/// Parses `x,y,z` into an axis.
pub fn parse_axis(s: &str) -> Result<[f64; 3], ParseError> {
    let parts: Vec<&str> = s.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(ParseError::InvalidAxisFormat(s.to_string()));
    };
    Ok([
        parse_component(x, "axis x", s)?,
        parse_component(y, "axis y", s)?,
        parse_component(z, "axis z", s)?,
    ])
}

/// Parses `distance:angle:x,y,z` into a [`Placement`].
///
/// Only the syntax is checked here; range checks (finite values, non-zero
/// axis) happen when the generation config is built.
pub fn parse_placement(s: &str) -> Result<Placement, ParseError> {
    let parts: Vec<&str> = s.split(':').collect();
    let [distance, angle, axis] = parts.as_slice() else {
        return Err(ParseError::InvalidPlacementFormat(s.to_string()));
    };
    if axis.trim().is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "axis",
            input: s.to_string(),
        });
    }
    Ok(Placement::new(
        parse_component(distance, "distance", s)?,
        parse_component(angle, "angle", s)?,
        parse_axis(axis.trim())?,
    ))
}
