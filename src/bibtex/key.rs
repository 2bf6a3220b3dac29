use crate::Publication;
use crate::utils::first_author_surname;

/// Number of leading title words folded into the key.
const TITLE_WORDS: usize = 2;

/// Citation key built from the first author's surname, the year and the first
/// two title words, e.g. `singh2024addressingunproductive`.
///
/// Only lowercase ASCII letters and digits survive. Two publications that agree
/// on all three parts get the same key.
pub fn citation_key(publication: &Publication) -> String {
    let surname = key_fragment(first_author_surname(&publication.authors));
    let year = publication.year.first_year().unwrap_or_default();
    let title: String = publication
        .title
        .split_whitespace()
        .take(TITLE_WORDS)
        .map(key_fragment)
        .collect();
    format!("{surname}{year}{title}")
}

fn key_fragment(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PublicationType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn publication(authors: &str, title: &str, year: &str) -> Publication {
        Publication::new("id", PublicationType::Journal, authors, title, "Source", year)
    }

    #[rstest]
    #[case("Singh, J., & Singh, M.", "Addressing unproductive credit consumption.", "2024", "singh2024addressingunproductive")]
    #[case("Singh, J., Batra, G.S., & Chatrath, S.K.", "Blockchain's Role in Social Welfare", "2024/2025", "singh2024blockchainsrole")]
    #[case("Singh, J.", "Integrating Microcredit.", "2025 (Expected)", "singh2025integratingmicrocredit")]
    #[case("Singh, J.", "Empowering India's Workers", "Communicated 2024", "singh2024empoweringindias")]
    #[case("O'Brien-Smith, A.", "Poverty", "Forthcoming", "obriensmithpoverty")]
    #[case("Jane Doe and John Roe", "Self-Help Groups (SHGs)", "2021", "janedoe2021selfhelpgroups")]
    #[case("", "", "", "")]
    fn test_citation_key(
        #[case] authors: &str,
        #[case] title: &str,
        #[case] year: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(citation_key(&publication(authors, title, year)), expected);
    }

    #[test]
    fn test_numeric_year() {
        let publication = Publication::new(
            "id",
            PublicationType::Journal,
            "Müller, K.",
            "Über Armut",
            "Source",
            2019,
        );
        assert_eq!(citation_key(&publication), "mller2019berarmut");
    }
}
