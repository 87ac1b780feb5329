use serde::{Deserialize, Deserializer};

/// Represents optional field semantics in partial update requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
///
/// Fields using it must carry `#[serde(default)]` so that an absent key
/// deserializes to `Unchanged`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => OptionField::SetToValue(v),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    /// Merges the patch over the current value.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::SetToNull => None,
            Self::SetToValue(v) => Some(v),
        }
    }

    /// Transform inner value if `SetToValue`
    pub fn map_value<U, F: FnOnce(T) -> U>(self, f: F) -> OptionField<U> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)),
        }
    }

    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<T> From<T> for OptionField<T> {
    fn from(value: T) -> Self {
        OptionField::SetToValue(value)
    }
}

pub type PatchString = OptionField<String>;
pub type PatchVec<T> = OptionField<Vec<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default)]
        location: PatchString,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"location": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"location": "Beijing"}"#).unwrap();

        assert!(absent.location.is_unchanged());
        assert_eq!(null.location, OptionField::SetToNull);
        assert_eq!(value.location, OptionField::SetToValue("Beijing".to_string()));
    }

    #[test]
    fn apply_to_merges_over_current_value() {
        let current = Some("Shanghai".to_string());

        assert_eq!(PatchString::Unchanged.apply_to(current.clone()), current);
        assert_eq!(PatchString::SetToNull.apply_to(current.clone()), None);
        assert_eq!(
            PatchString::from("Beijing".to_string()).apply_to(current),
            Some("Beijing".to_string())
        );
    }
}
