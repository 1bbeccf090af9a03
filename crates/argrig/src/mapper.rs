use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Error type returned by value mappers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type-erased parsed value.
pub type ArgValue = Arc<dyn Any + Send + Sync>;

type MapFn = dyn Fn(&str) -> Result<ArgValue, BoxError> + Send + Sync;

/// Converts a raw token into a typed value.
#[derive(Clone)]
pub struct ValueMapper {
    map: Arc<MapFn>,
    type_name: &'static str,
}

impl ValueMapper {
    /// Wrap a fallible conversion.
    pub fn new<T, E, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        E: Into<BoxError> + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let map: Arc<MapFn> = Arc::new(move |raw: &str| -> Result<ArgValue, BoxError> {
            f(raw)
                .map(|v| Arc::new(v) as ArgValue)
                .map_err(Into::into)
        });
        Self {
            map,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Identity mapping to `String`.
    pub fn string() -> Self {
        Self::new(|raw| Ok::<_, std::convert::Infallible>(raw.to_string()))
    }

    /// Mapping through `FromStr`.
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: Into<BoxError> + 'static,
    {
        Self::new(|raw| raw.parse::<T>())
    }

    pub fn boolean() -> Self {
        Self::parsed::<bool>()
    }

    pub fn map(&self, raw: &str) -> Result<ArgValue, BoxError> {
        (self.map)(raw)
    }

    /// Name of the produced type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Default for ValueMapper {
    fn default() -> Self {
        Self::string()
    }
}

impl fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueMapper")
            .field("type_name", &self.type_name)
            .finish()
    }
}

type SupplyFn = dyn Fn() -> Option<String> + Send + Sync;

/// Lazily produces the raw default token of a parser.
#[derive(Clone)]
pub struct DefaultSupplier(Arc<SupplyFn>);

impl DefaultSupplier {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn constant(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(move || Some(value.clone()))
    }

    pub fn none() -> Self {
        Self::new(|| None)
    }

    pub fn get(&self) -> Option<String> {
        (self.0)()
    }
}

impl Default for DefaultSupplier {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for DefaultSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultSupplier(..)")
    }
}
