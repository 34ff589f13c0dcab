use std::collections::HashMap;

use crate::core::Measurement;

/// Channel routing rule for one target channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRoute {
    /// Copy source[i]
    Direct(usize),
    /// Channel absent from the source, emit a placeholder
    Missing,
}

/// Name-based projection from a source channel order onto a target order.
///
/// Target channels that are not present in the source are routed to
/// [`ChannelRoute::Missing`] and filled with [`Measurement::placeholder`].
/// When a name appears more than once in the source, the first occurrence
/// wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMapper {
    source_channels: usize,
    target_names: Vec<String>,
    routing: Vec<ChannelRoute>,
}

impl ChannelMapper {
    pub fn new<S, T>(source_names: &[S], target_names: &[T]) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut first_index: HashMap<&str, usize> = HashMap::with_capacity(source_names.len());
        for (idx, name) in source_names.iter().enumerate() {
            first_index.entry(name.as_ref()).or_insert(idx);
        }

        let routing = target_names
            .iter()
            .map(|name| match first_index.get(name.as_ref()) {
                Some(&idx) => ChannelRoute::Direct(idx),
                None => ChannelRoute::Missing,
            })
            .collect();

        Self {
            source_channels: source_names.len(),
            target_names: target_names.iter().map(|n| n.as_ref().to_string()).collect(),
            routing,
        }
    }

    /// Project `source` onto the target channel order.
    ///
    /// # Panics
    /// If `source.len()` differs from the number of source names the mapper
    /// was built with.
    pub fn map<T: Measurement>(&self, source: &[T]) -> Vec<T> {
        assert_eq!(
            source.len(),
            self.source_channels,
            "Expected {} source channels, got {}",
            self.source_channels,
            source.len()
        );

        self.routing
            .iter()
            .map(|route| match route {
                ChannelRoute::Direct(idx) => source[*idx].clone(),
                ChannelRoute::Missing => T::placeholder(),
            })
            .collect()
    }

    pub fn source_channels(&self) -> usize {
        self.source_channels
    }

    pub fn target_channels(&self) -> usize {
        self.routing.len()
    }

    pub fn routing(&self) -> &[ChannelRoute] {
        &self.routing
    }

    /// Target names with no counterpart in the source
    pub fn missing_channels(&self) -> Vec<&str> {
        self.target_names
            .iter()
            .zip(&self.routing)
            .filter(|(_, route)| **route == ChannelRoute::Missing)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_table() {
        let mapper = ChannelMapper::new(&["A", "B"], &["B", "C", "A"]);
        assert_eq!(
            mapper.routing(),
            &[ChannelRoute::Direct(1), ChannelRoute::Missing, ChannelRoute::Direct(0)]
        );
        assert_eq!(mapper.missing_channels(), vec!["C"]);
    }

    #[test]
    #[should_panic(expected = "Expected 2 source channels")]
    fn test_wrong_source_length_panics() {
        let mapper = ChannelMapper::new(&["A", "B"], &["A"]);
        mapper.map(&[1.0_f64]);
    }
}
