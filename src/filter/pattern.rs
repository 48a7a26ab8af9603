//! Include/exclude pattern filters.

use crate::core::PatternError;
use crate::filter::flags::PatternFlags;

use regex::bytes::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Uncompiled description of a filter.
///
/// # Example
///
/// ```rust
/// use clamav_client::filter::{FilterSpec, PatternFlags};
///
/// let filter = FilterSpec::new()
///     .with_include("foo.*")
///     .with_exclude("foobar")
///     .with_flags(PatternFlags::NONE)
///     .compile()
///     .unwrap();
///
/// assert!(filter.matches("foobaz"));
/// assert!(!filter.matches("foobar"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// A value passes if it fully matches any of these. Empty passes everything.
    #[serde(default)]
    pub include: Vec<String>,

    /// A value is rejected if it fully matches any of these.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Flags applied to every pattern.
    #[serde(default)]
    pub flags: PatternFlags,
}

impl FilterSpec {
    /// Creates an empty spec, which compiles to a filter that passes everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include pattern.
    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Adds an exclude pattern.
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Sets the flags.
    pub fn with_flags(mut self, flags: PatternFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Compiles every pattern, failing on the first invalid one.
    pub fn compile(&self) -> Result<PatternFilter, PatternError> {
        PatternFilter::new(&self.include, &self.exclude, self.flags)
    }
}

/// A compiled pattern that must match the whole value.
#[derive(Debug, Clone)]
struct FullMatch {
    source: String,
    regex: Regex,
}

impl FullMatch {
    fn compile(pattern: &str, flags: PatternFlags) -> Result<Self, PatternError> {
        let invalid = |source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        };

        let build = |text: &str| {
            let mut builder = RegexBuilder::new(text);
            flags.apply(&mut builder);
            builder.build()
        };

        // Compile as written first so the error refers to the caller's text
        // and so unbalanced input cannot become valid once wrapped.
        build(pattern).map_err(invalid)?;

        // A valid pattern only fails to wrap when it ends inside a verbose
        // comment (from the flags or an inline `(?x)`). The newline ends the
        // comment and is ignored as verbose whitespace.
        let regex = match build(&format!(r"\A(?:{pattern})\z")) {
            Ok(regex) => regex,
            Err(_) => build(&format!("\\A(?:{pattern}\n)\\z")).map_err(invalid)?,
        };

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value.as_bytes())
    }
}

/// Predicate over strings built from include and exclude patterns.
///
/// A value passes when it fully matches at least one include pattern (or
/// the include list is empty) and fully matches no exclude pattern.
/// Exclusion always wins.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    include: Vec<FullMatch>,
    exclude: Vec<FullMatch>,
}

impl PatternFilter {
    /// Compiles `include` and `exclude` under `flags`.
    ///
    /// Patterns use the syntax of the [`regex`] crate. It has no lookaround
    /// and no backreferences; patterns using them are rejected as `Invalid`.
    ///
    /// # Errors
    ///
    /// - `Invalid` naming the first pattern that fails to compile.
    /// - `UnsupportedFlags` if `flags` carries unknown bits.
    /// - `ConflictingFlags` if `flags` sets both `UNICODE` and `ASCII`.
    pub fn new<I, E>(include: I, exclude: E, flags: PatternFlags) -> Result<Self, PatternError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        flags.validate()?;

        let include = include
            .into_iter()
            .map(|p| FullMatch::compile(p.as_ref(), flags))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude = exclude
            .into_iter()
            .map(|p| FullMatch::compile(p.as_ref(), flags))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { include, exclude })
    }

    /// A filter without patterns; every value passes.
    pub fn pass_all() -> Self {
        Self::default()
    }

    /// Evaluates the filter against `value`.
    pub fn matches(&self, value: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.is_match(value));

        included && !self.exclude.iter().any(|p| p.is_match(value))
    }

    /// Include patterns as written.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(|p| p.source.as_str())
    }

    /// Exclude patterns as written.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(|p| p.source.as_str())
    }

    /// Applies the filter to values of type `T` through `projection`.
    pub fn with_projection<T, F, S>(self, projection: F) -> ProjectedFilter<T, F>
    where
        T: ?Sized,
        F: Fn(&T) -> S,
        S: AsRef<str>,
    {
        ProjectedFilter {
            filter: self,
            projection,
            _value: PhantomData,
        }
    }

    /// Converts the filter into a plain closure.
    pub fn into_predicate(self) -> impl Fn(&str) -> bool + Clone + Send + Sync {
        move |value: &str| self.matches(value)
    }
}

/// A [`PatternFilter`] evaluated on a projection of the value.
pub struct ProjectedFilter<T: ?Sized, F> {
    filter: PatternFilter,
    projection: F,
    _value: PhantomData<fn(&T)>,
}

impl<T, F, S> ProjectedFilter<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> S,
    S: AsRef<str>,
{
    /// Projects `value` and evaluates the filter on the result.
    pub fn matches(&self, value: &T) -> bool {
        let projected = (self.projection)(value);
        self.filter.matches(projected.as_ref())
    }

    /// Returns the underlying string filter.
    pub fn filter(&self) -> &PatternFilter {
        &self.filter
    }

    /// Converts the filter into a plain closure.
    pub fn into_predicate(self) -> impl Fn(&T) -> bool {
        move |value: &T| self.matches(value)
    }
}

impl<T: ?Sized, F: Clone> Clone for ProjectedFilter<T, F> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            projection: self.projection.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: ?Sized, F> fmt::Debug for ProjectedFilter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedFilter")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
