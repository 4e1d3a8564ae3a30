/// A parsed query: ordered-unique plus-terms and minus-terms, borrowing
/// into the raw query string they were parsed from.
///
/// The sequential parser sorts and de-duplicates both sequences in place;
/// the parallel parser keeps duplicates, since re-scoring the same term
/// twice is commutative and therefore harmless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query<'a> {
    pub plus: Vec<&'a str>,
    pub minus: Vec<&'a str>,
}

impl<'a> Query<'a> {
    pub fn is_empty(&self) -> bool {
        self.plus.is_empty() && self.minus.is_empty()
    }

    /// Sorts and removes duplicates from both term sequences in place.
    pub fn dedup_sorted(&mut self) {
        self.plus.sort_unstable();
        self.plus.dedup();
        self.minus.sort_unstable();
        self.minus.dedup();
    }
}
