//! Error types.
//!
//! The layout itself has no I/O and no recoverable runtime failures. Errors
//! cover malformed input: trees with bad identifiers, color strings that
//! cannot be parsed, and configuration objects that fail to decode at the
//! JavaScript boundary.

use crate::tree::NodeKey;

/// Structural problems in a tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A node was supplied without an identifier.
    ///
    /// `parent` is the nearest ancestor that does have a key, if any.
    #[error("{level} at position {position} has an empty identifier (parent: {parent:?})")]
    MissingIdentifier {
        /// Hierarchy level of the offending node.
        level: &'static str,
        /// Position among its siblings.
        position: usize,
        /// Key of the enclosing node, if any.
        parent: Option<NodeKey>,
    },

    /// Two siblings share an identifier, so their slices would collide.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(NodeKey),
}

/// Failure to interpret a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The string is not in any supported color notation.
    #[error("unsupported color notation `{0}`")]
    Unsupported(String),

    /// The notation is recognized but a component is malformed.
    #[error("malformed color component `{component}` in `{input}`")]
    Component {
        /// The original input.
        input: String,
        /// The component text that failed to parse.
        component: String,
    },
}

/// Invalid wheel configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Ring radii must be strictly increasing with gaps between rings.
    #[error("ring radii must be strictly increasing from a non-negative start, got {0:?}")]
    BandOrder([f64; 6]),

    /// A fade factor must be within (0, 1].
    #[error("{name} must be within (0, 1], got {value}")]
    AlphaFactor {
        /// Which factor is out of range.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The palette needs at least one color.
    #[error("palette cannot be empty")]
    EmptyPalette,
}

/// Top-level error for the engine and its JavaScript facade.
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    /// Tree validation failed.
    #[error("invalid tree: {0}")]
    Tree(#[from] TreeError),

    /// Configuration validation failed.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),

    /// A value passed from JavaScript had the wrong shape.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Result alias used across the crate.
pub type WheelResult<T> = Result<T, WheelError>;
