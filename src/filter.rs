use crate::models::Ad;

/// Keeps only ads that mention one of the target places in their title,
/// location or description (case-insensitive substring match).
#[derive(Debug, Clone)]
pub struct LocationFilter {
    targets: Vec<String>,
}

impl LocationFilter {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            targets: targets
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn matches(&self, ad: &Ad) -> bool {
        let haystack = [
            Some(ad.title.as_str()),
            ad.location.as_deref(),
            ad.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

        self.targets.iter().any(|t| haystack.contains(t.as_str()))
    }

    /// Order-preserving
    pub fn apply(&self, ads: Vec<Ad>) -> Vec<Ad> {
        ads.into_iter().filter(|ad| self.matches(ad)).collect()
    }
}
