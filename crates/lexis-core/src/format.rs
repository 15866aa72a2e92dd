use crate::dictionary::{DictionaryRow, DictionarySettings, HeaderPart};
use crate::result::SearchEntry;

/// Upper frequency-rank bound of each star band
const STAR_BANDS: [(u32, &str); 5] = [
    (1_500, "★★★★★"),
    (5_000, "★★★★"),
    (15_000, "★★★"),
    (30_000, "★★"),
    (60_000, "★"),
];

pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format(row: &DictionaryRow, settings: &DictionarySettings) -> SearchEntry {
        SearchEntry {
            term: row.term.clone(),
            altterm: row.altterm.clone(),
            pronunciation: row.pronunciation.clone(),
            part_of_speech: row.part_of_speech.clone(),
            definition: row.definition.clone(),
            examples: row.examples.clone(),
            audio: row.audio.clone(),
            star_rating: Self::star_rating(row.frequency).to_string(),
            header: Self::header(row, settings),
        }
    }

    /// Star label for a frequency rank; unranked and rare words get none
    pub fn star_rating(frequency: Option<u32>) -> &'static str {
        let Some(rank) = frequency else {
            return "";
        };
        STAR_BANDS
            .iter()
            .find(|(bound, _)| rank <= *bound)
            .map_or("", |(_, stars)| *stars)
    }

    /// Display head built from the dictionary's header parts, e.g. `食べる 【たべる】`.
    /// `None` when the definition already carries it.
    pub fn header(row: &DictionaryRow, settings: &DictionarySettings) -> Option<String> {
        if settings.duplicate_header {
            return None;
        }

        let mut shown: Vec<&str> = Vec::new();
        for part in &settings.term_header_parts {
            let value = match part {
                HeaderPart::Term => row.term.as_str(),
                HeaderPart::Altterm => row.altterm.as_str(),
                HeaderPart::Pronunciation => row.pronunciation.as_str(),
            };
            if !value.is_empty() && !shown.contains(&value) {
                shown.push(value);
            }
        }

        let (head, rest) = shown.split_first()?;
        if rest.is_empty() {
            Some(head.to_string())
        } else {
            Some(format!("{head} 【{}】", rest.join("・")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_bands() {
        assert_eq!(ResultFormatter::star_rating(Some(1)), "★★★★★");
        assert_eq!(ResultFormatter::star_rating(Some(1_500)), "★★★★★");
        assert_eq!(ResultFormatter::star_rating(Some(1_501)), "★★★★");
        assert_eq!(ResultFormatter::star_rating(Some(15_000)), "★★★");
        assert_eq!(ResultFormatter::star_rating(Some(29_999)), "★★");
        assert_eq!(ResultFormatter::star_rating(Some(60_000)), "★");
        assert_eq!(ResultFormatter::star_rating(Some(60_001)), "");
        assert_eq!(ResultFormatter::star_rating(None), "");
    }

    #[test]
    fn test_header_parts() {
        let row = DictionaryRow::new("食べる")
            .with_altterm("喰べる")
            .with_pronunciation("たべる");
        let settings = DictionarySettings::default();
        assert_eq!(
            ResultFormatter::header(&row, &settings).as_deref(),
            Some("食べる 【喰べる・たべる】")
        );

        let reading_first = DictionarySettings {
            term_header_parts: vec![HeaderPart::Pronunciation, HeaderPart::Term],
            ..Default::default()
        };
        assert_eq!(
            ResultFormatter::header(&row, &reading_first).as_deref(),
            Some("たべる 【食べる】")
        );
    }

    #[test]
    fn test_header_skips_repeats_and_empties() {
        let row = DictionaryRow::new("cat").with_altterm("cat");
        assert_eq!(
            ResultFormatter::header(&row, &DictionarySettings::default()).as_deref(),
            Some("cat")
        );
    }

    #[test]
    fn test_duplicate_header_suppressed() {
        let row = DictionaryRow::new("猫").with_definition("猫【ねこ】 cat");
        let settings = DictionarySettings {
            duplicate_header: true,
            ..Default::default()
        };
        let entry = ResultFormatter::format(&row, &settings);
        assert_eq!(entry.header, None);
        assert_eq!(entry.definition, "猫【ねこ】 cat");
    }
}
