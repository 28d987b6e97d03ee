//! CSS selector subset
//!
//! Effects address elements by *role* rather than by holding references, and a
//! role is a selector. Only the subset the page scripts need is supported:
//!
//! - Type selectors: `main`, `a`
//! - ID selectors: `#navbar`
//! - Class selectors: `.project-card`
//! - Attribute presence: `a[href]`
//! - Compounds of the above: `button.filter-btn.active`
//! - Selector lists: `.section, .hero-title, .hero-subtitle`
//!
//! Combinators and pseudo-classes are rejected at parse time. The browser host
//! hands [`Selector::as_str`] to `querySelectorAll` verbatim, while the
//! in-memory host matches through [`Selector::matches`].
//!
//! # Example
//!
//! ```
//! use folio_core::selector::Selector;
//!
//! let selector = Selector::parse(".section, a[href]").unwrap();
//! assert_eq!(selector.len(), 2);
//! ```

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, tuple},
    Finish, IResult,
};
use smallvec::SmallVec;

use crate::error::{FolioError, Result};

/// Anything a selector can be matched against
pub trait SelectorTarget {
    /// Lowercase tag name
    fn tag(&self) -> &str;
    /// Value of the `id` attribute, if any
    fn element_id(&self) -> Option<&str>;
    /// Whether the class list contains `class`
    fn has_class(&self, class: &str) -> bool;
    /// Whether the attribute is present
    fn has_attribute(&self, name: &str) -> bool;
}

/// A single compound selector (`tag#id.class[attr]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attributes: SmallVec<[String; 1]>,
}

impl Compound {
    /// Check whether a target satisfies every part of this compound
    pub fn matches<T: SelectorTarget + ?Sized>(&self, target: &T) -> bool {
        if let Some(tag) = &self.tag {
            if !target.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if target.element_id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| target.has_class(c))
            && self.attributes.iter().all(|a| target.has_attribute(a))
    }
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: SmallVec<[Compound; 1]>,
}

impl Selector {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        let parsed = all_consuming(selector_list)(trimmed).finish();
        match parsed {
            Ok((_, alternatives)) => Ok(Self {
                source: trimmed.to_string(),
                alternatives: alternatives.into_iter().collect(),
            }),
            Err(err) => Err(FolioError::Selector {
                selector: source.to_string(),
                message: describe_failure(trimmed, err.input),
            }),
        }
    }

    /// Selector for a single element id
    pub fn id(id: &str) -> Self {
        Self {
            source: format!("#{id}"),
            alternatives: smallvec::smallvec![Compound {
                id: Some(id.to_string()),
                ..Default::default()
            }],
        }
    }

    /// Selector for a single class
    pub fn class(class: &str) -> Self {
        Self {
            source: format!(".{class}"),
            alternatives: smallvec::smallvec![Compound {
                classes: smallvec::smallvec![class.to_string()],
                ..Default::default()
            }],
        }
    }

    /// Selector for a tag name
    pub fn tag(tag: &str) -> Self {
        Self {
            source: tag.to_ascii_lowercase(),
            alternatives: smallvec::smallvec![Compound {
                tag: Some(tag.to_ascii_lowercase()),
                ..Default::default()
            }],
        }
    }

    /// True if any alternative matches the target
    pub fn matches<T: SelectorTarget + ?Sized>(&self, target: &T) -> bool {
        self.alternatives.iter().any(|c| c.matches(target))
    }

    /// The normalized CSS text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The comma-separated alternatives
    pub fn alternatives(&self) -> &[Compound] {
        &self.alternatives
    }

    /// Number of alternatives
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Always false for a parsed selector; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Parser
// =============================================================================

enum Part<'a> {
    Id(&'a str),
    Class(&'a str),
    Attribute(&'a str),
}

fn describe_failure(source: &str, rest: &str) -> String {
    let offset = source.len().saturating_sub(rest.len());
    let preview: String = rest.chars().take(20).collect();
    if preview.is_empty() {
        format!("unexpected end of input at column {}", offset + 1)
    } else {
        format!("unexpected `{}` at column {}", preview, offset + 1)
    }
}

/// Identifier (alphanumeric, hyphen, underscore)
fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn part(input: &str) -> IResult<&str, Part<'_>> {
    alt((
        map(preceded(char('#'), identifier), Part::Id),
        map(preceded(char('.'), identifier), Part::Class),
        map(
            delimited(
                char('['),
                delimited(multispace0, identifier, multispace0),
                char(']'),
            ),
            Part::Attribute,
        ),
    ))(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (rest, (tag, parts)) = tuple((opt(identifier), many0(part)))(input)?;
    if tag.is_none() && parts.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeWhile1,
        )));
    }

    let mut compound = Compound {
        tag: tag.map(|t| t.to_ascii_lowercase()),
        ..Default::default()
    };
    for part in parts {
        match part {
            Part::Id(id) => compound.id = Some(id.to_string()),
            Part::Class(class) => compound.classes.push(class.to_string()),
            Part::Attribute(name) => compound.attributes.push(name.to_ascii_lowercase()),
        }
    }
    Ok((rest, compound))
}

fn selector_list(input: &str) -> IResult<&str, Vec<Compound>> {
    separated_list1(
        delimited(multispace0, char(','), multispace0),
        compound,
    )(input)
}
