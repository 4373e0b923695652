use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::{
    error::{AppError, AppResult},
    models::{Credit, RawCredit, RawTitle, Scores, Title},
};

pub const MISSING_CHARACTER: &str = "Not Specified";
pub const MISSING_DESCRIPTION: &str = "No description available";
pub const MISSING_CERTIFICATION: &str = "Not Specified";

/// Normalized titles joined with their credits
///
/// Titles keep their input order; that order is the row order of every
/// downstream stage.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<Title>,
    positions: HashMap<String, usize>,
    credits: HashMap<String, Vec<Credit>>,
}

impl Catalog {
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Title> {
        self.positions.get(id).map(|&pos| &self.titles[pos])
    }

    /// Cast and crew of one title, in input order
    pub fn cast(&self, id: &str) -> &[Credit] {
        self.credits.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every credit attached to a known title
    pub fn credits(&self) -> impl Iterator<Item = &Credit> {
        self.titles.iter().flat_map(|title| self.cast(&title.id).iter())
    }
}

/// Cleans both raw tables and joins credits onto titles by identifier
///
/// Fails on the first malformed list literal or on a repeated title id.
pub fn normalize(raw_titles: Vec<RawTitle>, raw_credits: Vec<RawCredit>) -> AppResult<Catalog> {
    let mut titles = Vec::with_capacity(raw_titles.len());
    let mut positions = HashMap::with_capacity(raw_titles.len());

    for raw in raw_titles {
        let title = normalize_title(raw)?;
        if positions.insert(title.id.clone(), titles.len()).is_some() {
            return Err(AppError::InvalidInput(format!(
                "Duplicate title id '{}'",
                title.id
            )));
        }
        titles.push(title);
    }

    let mut credits: HashMap<String, Vec<Credit>> = HashMap::new();
    let mut orphaned = 0usize;
    for raw in raw_credits {
        let credit = normalize_credit(raw);
        if positions.contains_key(&credit.title_id) {
            credits.entry(credit.title_id.clone()).or_default().push(credit);
        } else {
            orphaned += 1;
        }
    }

    if orphaned > 0 {
        tracing::warn!(orphaned, "Credits reference unknown titles and were skipped");
    }

    tracing::info!(
        titles = titles.len(),
        titles_with_credits = credits.len(),
        "Catalog normalized"
    );

    Ok(Catalog {
        titles,
        positions,
        credits,
    })
}

pub fn normalize_title(raw: RawTitle) -> AppResult<Title> {
    let genres = parse_list_literal("genres", &raw.genres)?;
    let production_countries = parse_list_literal("production_countries", &raw.production_countries)?;

    Ok(Title {
        id: raw.id,
        title: raw.title,
        kind: raw.kind,
        description: raw
            .description
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
        release_year: raw.release_year,
        age_certification: raw
            .age_certification
            .unwrap_or_else(|| MISSING_CERTIFICATION.to_string()),
        genres,
        production_countries,
        scores: Scores {
            imdb_score: raw.imdb_score,
            tmdb_score: raw.tmdb_score,
            tmdb_popularity: raw.tmdb_popularity,
            runtime: raw.runtime,
        },
    })
}

pub fn normalize_credit(raw: RawCredit) -> Credit {
    Credit {
        title_id: raw.id,
        name: raw.name,
        character: raw
            .character
            .unwrap_or_else(|| MISSING_CHARACTER.to_string()),
        role: raw.role,
    }
}

/// Parses a list literal of quoted strings such as `['drama', "it's"]`
///
/// Single and double quotes, backslash escapes, and a trailing comma are
/// accepted. Anything else is a [`AppError::MalformedList`].
pub fn parse_list_literal(column: &'static str, text: &str) -> AppResult<Vec<String>> {
    let malformed = || AppError::MalformedList {
        column,
        value: text.to_string(),
    };

    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;

    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        skip_whitespace(&mut chars);
        let Some(&quote) = chars.peek() else {
            break;
        };
        if quote != '\'' && quote != '"' {
            return Err(malformed());
        }
        chars.next();

        let mut item = String::new();
        loop {
            match chars.next() {
                Some('\\') => match chars.next() {
                    Some('n') => item.push('\n'),
                    Some('t') => item.push('\t'),
                    Some(escaped) => item.push(escaped),
                    None => return Err(malformed()),
                },
                Some(c) if c == quote => break,
                Some(c) => item.push(c),
                None => return Err(malformed()),
            }
        }
        items.push(item);

        skip_whitespace(&mut chars);
        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(_) => return Err(malformed()),
        }
    }

    Ok(items)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn raw_title(id: &str, genres: &str) -> RawTitle {
        RawTitle {
            id: id.to_string(),
            title: format!("Title {id}"),
            kind: Some("MOVIE".to_string()),
            description: None,
            release_year: Some(1999),
            age_certification: None,
            runtime: Some(100.0),
            genres: genres.to_string(),
            production_countries: "['US']".to_string(),
            seasons: Some(2.0),
            imdb_score: Some(7.0),
            tmdb_score: None,
            tmdb_popularity: Some(12.5),
        }
    }

    fn raw_credit(id: &str, name: &str, character: Option<&str>) -> RawCredit {
        RawCredit {
            id: id.to_string(),
            name: name.to_string(),
            character: character.map(str::to_string),
            role: Role::Actor,
        }
    }

    #[test]
    fn test_parse_list_literal_variants() {
        assert_eq!(parse_list_literal("genres", "[]").unwrap(), Vec::<String>::new());
        assert_eq!(
            parse_list_literal("genres", "['drama', 'crime']").unwrap(),
            vec!["drama", "crime"]
        );
        assert_eq!(
            parse_list_literal("genres", r#"  ["it's", 'a\'b',]  "#).unwrap(),
            vec!["it's", "a'b"]
        );
    }

    #[test]
    fn test_parse_list_literal_rejects_malformed() {
        for bad in ["", "drama", "['drama'", "[drama]", "['a' 'b']", "[,]", "['a\\"] {
            let err = parse_list_literal("genres", bad).unwrap_err();
            assert!(
                matches!(err, AppError::MalformedList { column: "genres", .. }),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_normalize_title_fills_sentinels() {
        let title = normalize_title(raw_title("tm1", "['drama']")).unwrap();
        assert_eq!(title.description, MISSING_DESCRIPTION);
        assert_eq!(title.age_certification, MISSING_CERTIFICATION);
        assert_eq!(title.genres, vec!["drama"]);
        assert_eq!(title.production_countries, vec!["US"]);
        assert_eq!(title.scores.tmdb_score, None);
        assert_eq!(title.scores.runtime, Some(100.0));
    }

    #[test]
    fn test_normalize_joins_credits() {
        let catalog = normalize(
            vec![raw_title("tm1", "[]"), raw_title("tm2", "['comedy']")],
            vec![
                raw_credit("tm1", "Ada", None),
                raw_credit("tm2", "Grace", Some("Herself")),
                raw_credit("tm1", "Linus", Some("Villain")),
                raw_credit("tm9", "Nobody", None),
            ],
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cast("tm1").len(), 2);
        assert_eq!(catalog.cast("tm1")[0].character, MISSING_CHARACTER);
        assert_eq!(catalog.cast("tm2")[0].character, "Herself");
        assert!(catalog.cast("tm9").is_empty());
        assert_eq!(catalog.credits().count(), 3);
        assert_eq!(catalog.get("tm2").unwrap().genres, vec!["comedy"]);
    }

    #[test]
    fn test_normalize_aborts_on_malformed_genres() {
        let result = normalize(
            vec![raw_title("tm1", "[]"), raw_title("tm2", "comedy")],
            vec![],
        );
        assert!(matches!(result, Err(AppError::MalformedList { .. })));
    }

    #[test]
    fn test_normalize_rejects_duplicate_ids() {
        let result = normalize(vec![raw_title("tm1", "[]"), raw_title("tm1", "[]")], vec![]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
