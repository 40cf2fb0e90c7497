//! Provide [`Loader`] implementations.
use lazy_static::lazy_static;
#[cfg(feature = "enable_log")]
use log::trace;
use regex::Regex;

use crate::{DotenvError, EnvMap, Repository, NOT_POSSIBLE};

pub(crate) mod lines;
pub(crate) mod parser;

/// Parse raw `.env` content into a [`Repository`].
pub trait Loader {
    /// Load content into repository, returns loaded variables in order.
    fn load(&self, repository: &mut dyn Repository, content: &str)
        -> Result<EnvMap, DotenvError>;
}

/// Default [`Loader`].
///
/// * `NAME=value`, `export NAME=value`, `NAME` without value.
/// * `'single'` values are literal, `"double"` values support escapes and may span lines.
/// * `${NAME}` in unquoted and double quoted values is replaced by the value
///   already in the repository, unknown names are kept as is.
/// * `#` starts a comment outside quotes.
///
/// ```
/// use dotenv_loader::*;
/// let mut repository = RepositoryBuilder::create()
///     .with_readers(Some(vec![]))
///     .with_writers(Some(vec![]))
///     .make();
/// let vars = DefaultLoader::new()
///     .load(&mut repository, "A=1 # one\nB=\"x\\ty\"")
///     .unwrap();
/// assert_eq!(Some(Some("1")), vars.get("A"));
/// assert_eq!(Some(Some("x\ty")), vars.get("B"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLoader;

impl DefaultLoader {
    /// Create a new [`DefaultLoader`].
    pub fn new() -> Self {
        DefaultLoader
    }
}

fn resolve_nested_variables(repository: &dyn Repository, value: parser::Value) -> String {
    lazy_static! {
        static ref VAR: Regex = Regex::new(r"\A\$\{([a-zA-Z0-9_.]+)\}").expect(NOT_POSSIBLE);
    }
    let (mut chars, vars) = value.into_parts();
    for pos in vars.into_iter().rev() {
        let found = VAR
            .captures(&chars[pos..])
            .and_then(|cap| Some((cap.get(0)?.end(), repository.get(cap.get(1)?.as_str())?)));
        if let Some((end, replace)) = found {
            chars.replace_range(pos..pos + end, &replace);
        }
    }
    chars
}

impl Loader for DefaultLoader {
    fn load(
        &self,
        repository: &mut dyn Repository,
        content: &str,
    ) -> Result<EnvMap, DotenvError> {
        lazy_static! {
            static ref NEWLINE: Regex = Regex::new(r"\r\n|\n|\r").expect(NOT_POSSIBLE);
        }
        let lines: Vec<&str> = NEWLINE.split(content).collect();
        let mut vars = EnvMap::new();
        for entry in lines::process(&lines) {
            let (name, value) = parser::parse(&entry)?;
            let value = match value {
                Some(v) => Some(resolve_nested_variables(&*repository, v)),
                None => None,
            };
            #[cfg(feature = "enable_log")]
            trace!("Load variable {}.", name);
            repository.set(&name, value.as_deref());
            vars.insert(name, value);
        }
        Ok(vars)
    }
}
