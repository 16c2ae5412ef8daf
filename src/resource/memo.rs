//! Per-field memo cells for lazily derived relationships.

/// A value computed on first access and kept until cleared.
///
/// Entities hold one `Memo` per relationship accessor; `Resource::invalidate`
/// clears them all whenever the underlying representation is replaced.
#[derive(Debug, Clone)]
pub struct Memo<T>(Option<T>);

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Memo<T> {
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn set(&mut self, value: T) -> &mut T {
        self.0.insert(value)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<T> Memo<Vec<T>> {
    /// Memoized list, or an empty slice if not computed yet
    pub fn as_slice(&self) -> &[T] {
        self.0.as_deref().unwrap_or_default()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_deref_mut().unwrap_or_default()
    }
}
