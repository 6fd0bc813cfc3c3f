// algebra.rs — May-alias queries over alias annotations
//
// The derived operations the whole-graph alias analyzer is built from:
// set overlap, may-alias, write-hazard observation, containment resolution,
// and contract union. All queries are conservative: they may report a false
// "may alias" but never a false "no alias".

use indexmap::IndexSet;

use crate::annot::{AliasAnnotation, AliasAnnotationBuilder};
use crate::token::AliasToken;

/// True iff the two sets share at least one token.
pub fn sets_overlap(a: &IndexSet<AliasToken>, b: &IndexSet<AliasToken>) -> bool {
    // Probe with the smaller set.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|t| large.contains(t))
}

/// Conservative may-alias between two operands.
///
/// Two operands may alias iff any pairing of their entry and exit sets
/// overlaps. The wildcard needs no special case here: it is an ordinary
/// member of every un-analyzable operand's sets, so an operand carrying the
/// wildcard on entry overlaps with any other operand carrying it on either
/// side — exactly the conservative-widening rule.
pub fn may_alias(a: &AliasAnnotation, b: &AliasAnnotation) -> bool {
    sets_overlap(a.input_sets(), b.input_sets())
        || sets_overlap(a.input_sets(), b.output_sets())
        || sets_overlap(a.output_sets(), b.input_sets())
        || sets_overlap(a.output_sets(), b.output_sets())
}

/// True iff a write through `writer` is observable through `other`.
///
/// A write hazard exists when the writing operand shares any alias set with
/// the other operand; operands with disjoint sets are unaffected. A writer
/// whose sets are all empty aliases nothing tracked and hazards nothing.
pub fn observes_write(writer: &AliasAnnotation, other: &AliasAnnotation) -> bool {
    writer.is_write() && may_alias(writer, other)
}

/// Resolve the annotation governing a nested element position.
///
/// `path` indexes through contained element types: `[0]` is the first type
/// parameter of the operand, `[0, 1]` the second type parameter of that, and
/// so on. An empty path is the operand itself. Container identity and
/// element identity are independent axes; element queries must go through
/// this resolution, never through the container's own sets.
///
/// Panics if a path index is out of range. That is a producer/consumer
/// schema mismatch, not a recoverable condition.
pub fn resolve_element<'a>(annot: &'a AliasAnnotation, path: &[usize]) -> &'a AliasAnnotation {
    let mut current = annot;
    for &index in path {
        current = &current.contained()[index];
    }
    current
}

/// Union of two contracts for the same operand position, e.g. when a graph
/// value can reach an operand from more than one schema source.
///
/// Entry sets union; the write flag ors; contained annotations merge
/// positionally (a position present on one side only is carried through
/// unchanged). The lazy output default is preserved: the merged annotation
/// records output sets only if at least one argument diverged, and the union
/// is then taken over effective output sets so the defaulting side's exit
/// membership is not lost.
pub fn merge(a: &AliasAnnotation, b: &AliasAnnotation) -> AliasAnnotation {
    let mut builder = AliasAnnotationBuilder::new();
    for &token in a.input_sets().iter().chain(b.input_sets()) {
        builder.add_input_set(token);
    }
    if a.has_explicit_outputs() || b.has_explicit_outputs() {
        for &token in a.output_sets().iter().chain(b.output_sets()) {
            builder.add_output_set(token);
        }
    }
    builder.set_is_write(a.is_write() || b.is_write());

    let arity = a.contained().len().max(b.contained().len());
    for i in 0..arity {
        let child = match (a.contained().get(i), b.contained().get(i)) {
            (Some(x), Some(y)) => merge(x, y),
            (Some(x), None) => x.clone(),
            (None, Some(y)) => y.clone(),
            (None, None) => break,
        };
        builder.add_contained(child);
    }
    builder.build()
}

// ── Tests ───────────────────────────────────────────────────────────────────
