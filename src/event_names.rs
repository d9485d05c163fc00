use crate::{Callback, Handle, ListenerId};

/// Which event names an operation applies to.
///
/// Most calls pass a plain string and rely on the `From` conversions:
///
/// - `"change"` becomes [`EventNames::Single`]
/// - `"change reset"` (any whitespace) becomes [`EventNames::Multiple`],
///   applying the same callback and context to each name independently
///
/// [`EventNames::Map`] pairs every name with its own callback and is accepted
/// by `on`, `once`, `off` and `trigger` (which ignores the callbacks).
/// [`EventNames::Every`] stands for every name currently registered and is
/// only meaningful to `off` and `stop_listening`.
pub enum EventNames<A: 'static> {
    Single(String),
    Multiple(Vec<String>),
    Map(Vec<(String, Callback<A>)>),
    Every,
}

impl<A: 'static> EventNames<A> {
    pub fn is_every(&self) -> bool {
        matches!(self, EventNames::Every)
    }

    /// Normalizes the names into `(name, callback)` pairs, in the order given.
    ///
    /// Map entries carry their own callback; every other form shares
    /// `callback`. `Every` resolves to nothing, the caller decides what
    /// "every name" means.
    pub(crate) fn resolve(self, callback: Option<Callback<A>>) -> Vec<(String, Option<Callback<A>>)> {
        match self {
            EventNames::Single(name) => vec![(name, callback)],
            EventNames::Multiple(names) => names
                .into_iter()
                .map(|name| (name, callback.clone()))
                .collect(),
            EventNames::Map(pairs) => pairs
                .into_iter()
                .map(|(name, callback)| (name, Some(callback)))
                .collect(),
            EventNames::Every => Vec::new(),
        }
    }
}

impl<A: 'static> From<&str> for EventNames<A> {
    fn from(names: &str) -> Self {
        if names.contains(char::is_whitespace) {
            EventNames::Multiple(names.split_whitespace().map(str::to_owned).collect())
        } else {
            EventNames::Single(names.to_owned())
        }
    }
}

impl<A: 'static> From<String> for EventNames<A> {
    fn from(names: String) -> Self {
        if names.contains(char::is_whitespace) {
            EventNames::from(names.as_str())
        } else {
            EventNames::Single(names)
        }
    }
}

impl<A: 'static> From<&String> for EventNames<A> {
    fn from(names: &String) -> Self {
        EventNames::from(names.as_str())
    }
}

impl<A: 'static> From<Vec<&str>> for EventNames<A> {
    fn from(names: Vec<&str>) -> Self {
        EventNames::Multiple(names.into_iter().map(str::to_owned).collect())
    }
}

impl<A: 'static> From<Vec<(&str, Callback<A>)>> for EventNames<A> {
    fn from(pairs: Vec<(&str, Callback<A>)>) -> Self {
        EventNames::Map(
            pairs
                .into_iter()
                .map(|(name, callback)| (name.to_owned(), callback))
                .collect(),
        )
    }
}

impl<A: 'static> Clone for EventNames<A> {
    fn clone(&self) -> Self {
        match self {
            EventNames::Single(name) => EventNames::Single(name.clone()),
            EventNames::Multiple(names) => EventNames::Multiple(names.clone()),
            EventNames::Map(pairs) => EventNames::Map(pairs.clone()),
            EventNames::Every => EventNames::Every,
        }
    }
}

impl<A: 'static> std::fmt::Debug for EventNames<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventNames::Single(name) => f.debug_tuple("Single").field(name).finish(),
            EventNames::Multiple(names) => f.debug_tuple("Multiple").field(names).finish(),
            EventNames::Map(pairs) => {
                let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_str()).collect();
                f.debug_tuple("Map").field(&names).finish()
            }
            EventNames::Every => write!(f, "Every"),
        }
    }
}

/// Which registrations of a bucket `off` removes.
///
/// - [`Selector::Any`]: every registration (optionally narrowed by context)
/// - [`Selector::Id`]: exactly the registration with that id
/// - [`Selector::Callback`]: registrations of that callback, including ones
///   made with `once`
pub enum Selector<A: 'static> {
    Any,
    Id(ListenerId),
    Callback(Callback<A>),
}

impl<A: 'static> Selector<A> {
    pub fn is_any(&self) -> bool {
        matches!(self, Selector::Any)
    }
}

impl<A: 'static> Default for Selector<A> {
    fn default() -> Self {
        Selector::Any
    }
}

impl<A: 'static> From<ListenerId> for Selector<A> {
    fn from(id: ListenerId) -> Self {
        Selector::Id(id)
    }
}

impl<A: 'static> From<&Handle<A>> for Selector<A> {
    fn from(handle: &Handle<A>) -> Self {
        Selector::Id(handle.id())
    }
}

impl<A: 'static> From<Callback<A>> for Selector<A> {
    fn from(callback: Callback<A>) -> Self {
        Selector::Callback(callback)
    }
}

impl<A: 'static> From<&Callback<A>> for Selector<A> {
    fn from(callback: &Callback<A>) -> Self {
        Selector::Callback(callback.clone())
    }
}

impl<A: 'static> From<Option<Callback<A>>> for Selector<A> {
    fn from(callback: Option<Callback<A>>) -> Self {
        callback.map_or(Selector::Any, Selector::Callback)
    }
}

impl<A: 'static> Clone for Selector<A> {
    fn clone(&self) -> Self {
        match self {
            Selector::Any => Selector::Any,
            Selector::Id(id) => Selector::Id(*id),
            Selector::Callback(callback) => Selector::Callback(callback.clone()),
        }
    }
}

impl<A: 'static> std::fmt::Debug for Selector<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Any => write!(f, "Any"),
            Selector::Id(id) => write!(f, "Id({id})"),
            Selector::Callback(callback) => write!(f, "Callback({:p})", std::rc::Rc::as_ptr(callback)),
        }
    }
}
