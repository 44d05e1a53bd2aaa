//! User-supplied post-processing algorithms.

use smallvec::SmallVec;

/// Procedural post-processing code computing one named result.
///
/// The content is embedded verbatim into the solver section, so it must
/// pass the sanitizer before any document is emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Algorithm {
    /// Name of the computed result.
    pub result: String,
    /// Argument names in declared order.
    pub arguments: SmallVec<[String; 4]>,
    /// Source text.
    pub content: String,
}

impl Algorithm {
    /// Argument names in lexicographic order.
    pub fn sorted_arguments(&self) -> SmallVec<[&str; 4]> {
        let mut sorted: SmallVec<[&str; 4]> = self.arguments.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn sorted_arguments_leave_declared_order_alone() {
        let alg = Algorithm {
            result: "dose".into(),
            arguments: smallvec!["t".into(), "T".into(), "alpha".into()],
            content: "dose = T * t;".into(),
        };
        assert_eq!(alg.sorted_arguments().as_slice(), ["T", "alpha", "t"]);
        assert_eq!(alg.arguments[0], "t");
    }
}
