// annot.rs — Per-operand alias annotations
//
// The core value type of the crate. One AliasAnnotation records, for a single
// operand position of an operator signature, which alias sets the operand's
// storage belongs to on entry and on exit, whether the operand is written
// through, and the annotations of any contained element types.
//
// Built once at operator-registration time via AliasAnnotationBuilder, then
// frozen. Concurrent reads after construction need no synchronization.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use crate::token::AliasToken;

// ── Annotation ──────────────────────────────────────────────────────────────

/// Alias contract of one operand position. Immutable once built; construct
/// through [`AliasAnnotationBuilder`].
///
/// Sets are insertion-ordered, so the [`fmt::Display`] rendering is stable in
/// declaration order. Equality compares set membership (order-insensitive),
/// the write flag, and contained annotations positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasAnnotation {
    input_sets: IndexSet<AliasToken>,
    output_sets: IndexSet<AliasToken>,
    is_write: bool,
    contained: Vec<AliasAnnotation>,
}

impl AliasAnnotation {
    /// Alias sets this operand's storage belongs to when the operation
    /// starts. May be empty: the operand aliases nothing tracked.
    pub fn input_sets(&self) -> &IndexSet<AliasToken> {
        &self.input_sets
    }

    /// Alias sets this operand's storage belongs to when the operation ends.
    ///
    /// In the common case an operation does not change which sets an operand
    /// belongs to and no output set is ever recorded; the input sets are
    /// returned by reference, not copied. An explicitly recorded output set
    /// takes precedence (e.g. appending an element to a container moves the
    /// element into the container's set).
    pub fn output_sets(&self) -> &IndexSet<AliasToken> {
        if self.output_sets.is_empty() {
            &self.input_sets
        } else {
            &self.output_sets
        }
    }

    /// True iff an output set was recorded explicitly, diverging from the
    /// lazy input fallback.
    pub fn has_explicit_outputs(&self) -> bool {
        !self.output_sets.is_empty()
    }

    /// True iff the operand is written through during the operation.
    pub fn is_write(&self) -> bool {
        self.is_write
    }

    /// Annotations for contained element types, positional: index `i`
    /// corresponds to the i-th type parameter of the operand's declared type.
    /// Insertion order is preserved.
    pub fn contained(&self) -> &[AliasAnnotation] {
        &self.contained
    }

    pub fn input_contains(&self, token: AliasToken) -> bool {
        self.input_sets.contains(&token)
    }

    pub fn output_contains(&self, token: AliasToken) -> bool {
        self.output_sets().contains(&token)
    }

    /// Wildcard on entry: the operand is un-analyzable and must be treated
    /// as may-alias with every other wildcard-bearing operand.
    pub fn has_wildcard_input(&self) -> bool {
        self.input_sets.contains(&AliasToken::wildcard())
    }

    pub fn has_wildcard_output(&self) -> bool {
        self.output_sets().contains(&AliasToken::wildcard())
    }
}

/// Canonical rendering: `(` + pipe-joined input tokens in declaration order +
/// optional `[` + comma-joined contained renderings + `]` + `)`. Output sets
/// and the write flag do not render; this is the set-union display the
/// schema syntax round-trips through.
impl fmt::Display for AliasAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, token) in self.input_sets.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{token}")?;
        }
        if !self.contained.is_empty() {
            write!(f, "[")?;
            for (i, child) in self.contained.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
            write!(f, "]")?;
        }
        write!(f, ")")
    }
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Builder for [`AliasAnnotation`]. The four construction operations may be
/// called any number of times in any order; [`build`](Self::build) freezes
/// the result. Nothing mutates an annotation after that.
#[derive(Debug, Clone, Default)]
pub struct AliasAnnotationBuilder {
    annot: AliasAnnotation,
}

impl AliasAnnotationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record membership in `token`'s alias set on entry. Duplicate
    /// insertion is a no-op.
    pub fn add_input_set(&mut self, token: AliasToken) -> &mut Self {
        self.annot.input_sets.insert(token);
        self
    }

    /// Record membership in `token`'s alias set on exit. Distinct storage
    /// from the input sets; once any output set is added, the annotation's
    /// output side no longer follows its input side.
    pub fn add_output_set(&mut self, token: AliasToken) -> &mut Self {
        self.annot.output_sets.insert(token);
        self
    }

    pub fn set_is_write(&mut self, is_write: bool) -> &mut Self {
        self.annot.is_write = is_write;
        self
    }

    /// Append the annotation for the next contained element type. Positional
    /// order is meaningful and preserved.
    pub fn add_contained(&mut self, child: AliasAnnotation) -> &mut Self {
        self.annot.contained.push(child);
        self
    }

    pub fn build(self) -> AliasAnnotation {
        self.annot
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
