//! Structural archetype matching: include/exclude fingerprint pairs.

use super::fingerprint::Fingerprint;

/// Matches an archetype iff its fingerprint has every included bit and
/// none of the excluded bits. Immutable once built, per spec.
#[derive(Debug, Clone, Copy)]
pub struct ComponentQuery<const WORDS: usize> {
    include: Fingerprint<WORDS>,
    exclude: Fingerprint<WORDS>,
}

impl<const WORDS: usize> ComponentQuery<WORDS> {
    pub fn new(include: Fingerprint<WORDS>, exclude: Fingerprint<WORDS>) -> Self {
        Self { include, exclude }
    }

    pub fn matches(&self, fingerprint: &Fingerprint<WORDS>) -> bool {
        fingerprint.has_all(&self.include) && !fingerprint.has_one(&self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint_with(bits: &[usize]) -> Fingerprint<1> {
        let mut fp = Fingerprint::empty();
        for &bit in bits {
            fp.set_bit(bit);
        }
        fp
    }

    /// S6 from the spec: archetypes {A}, {A,B}, {A,C} with a query
    /// include {A} exclude {B} matches {A} and {A,C} but not {A,B}.
    #[test]
    fn s6_query_with_exclusion() {
        const A: usize = 0;
        const B: usize = 1;
        const C: usize = 2;

        let query = ComponentQuery::new(fingerprint_with(&[A]), fingerprint_with(&[B]));

        assert!(query.matches(&fingerprint_with(&[A])));
        assert!(!query.matches(&fingerprint_with(&[A, B])));
        assert!(query.matches(&fingerprint_with(&[A, C])));
    }

    /// Property 7: adding a component outside both the include and exclude
    /// sets must not change whether a query matches.
    #[test]
    fn match_is_independent_of_unrelated_bits() {
        let query = ComponentQuery::new(fingerprint_with(&[0]), fingerprint_with(&[1]));
        let base = fingerprint_with(&[0]);
        let with_extra = fingerprint_with(&[0, 9]);
        assert_eq!(query.matches(&base), query.matches(&with_extra));
        assert!(query.matches(&with_extra));
    }
}
