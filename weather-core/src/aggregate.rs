use async_trait::async_trait;
use tracing::debug;

use crate::{
    error::{Error, Result},
    provider::TemperatureProvider,
};

/// Averages the readings of an ordered set of providers.
///
/// Providers are queried one after another in insertion order. The first
/// failure aborts the whole computation and is returned unchanged; readings
/// gathered before it are discarded.
#[derive(Debug)]
pub struct MultiProvider {
    providers: Vec<Box<dyn TemperatureProvider>>,
}

impl MultiProvider {
    /// Fails with [`Error::NoProviders`] when `providers` is empty.
    pub fn new(providers: Vec<Box<dyn TemperatureProvider>>) -> Result<Self> {
        if providers.is_empty() {
            return Err(Error::NoProviders);
        }
        Ok(Self { providers })
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }
}

#[async_trait]
impl TemperatureProvider for MultiProvider {
    fn name(&self) -> &str {
        "multi"
    }

    async fn temperature(&self, city: &str) -> Result<f64> {
        let mut sum = 0.0;

        for provider in &self.providers {
            debug!(provider = provider.name(), city, "querying provider");
            sum += provider.temperature(city).await?;
        }

        Ok(sum / self.providers.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct Fixed {
        value: Option<f64>,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn ok(value: f64) -> Self {
            Self { value: Some(value), calls: Arc::default() }
        }

        fn failing() -> Self {
            Self { value: None, calls: Arc::default() }
        }

        fn counted(value: Option<f64>, calls: &Arc<AtomicUsize>) -> Self {
            Self { value, calls: Arc::clone(calls) }
        }
    }

    #[async_trait]
    impl TemperatureProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn temperature(&self, city: &str) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
                .ok_or_else(|| Error::InvalidConfig(format!("no reading for {city}")))
        }
    }

    fn multi(providers: Vec<Fixed>) -> MultiProvider {
        let boxed = providers
            .into_iter()
            .map(|p| Box::new(p) as Box<dyn TemperatureProvider>)
            .collect();
        MultiProvider::new(boxed).expect("non-empty provider set")
    }

    #[test]
    fn empty_provider_set_is_rejected() {
        let err = MultiProvider::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NoProviders));
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn single_provider_value_is_returned_exactly() {
        let mp = multi(vec![Fixed::ok(17.123456789)]);
        assert_eq!(mp.temperature("Oslo").await.expect("temperature"), 17.123456789);
    }

    #[tokio::test]
    async fn averages_all_readings() {
        let mp = multi(vec![Fixed::ok(20.0), Fixed::ok(10.0)]);
        assert_eq!(mp.temperature("Berlin").await.expect("temperature"), 15.0);

        let readings = [1.5, -3.25, 7.0, 0.1, 12.9];
        let mp = multi(readings.iter().copied().map(Fixed::ok).collect());
        let expected = readings.iter().sum::<f64>() / readings.len() as f64;

        let got = mp.temperature("Anywhere").await.expect("temperature");
        assert!((got - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn first_failure_aborts_and_is_returned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mp = multi(vec![
            Fixed::counted(Some(20.0), &calls),
            Fixed::counted(None, &calls),
            Fixed::counted(Some(10.0), &calls),
        ]);

        let err = mp.temperature("Paris").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: no reading for Paris");
        assert_eq!(calls.load(Ordering::SeqCst), 2, "providers after the failure must not be called");
    }

    #[tokio::test]
    async fn failure_in_last_provider_discards_earlier_readings() {
        let mp = multi(vec![Fixed::ok(20.0), Fixed::failing()]);
        assert!(mp.temperature("Rome").await.is_err());
    }

    #[test]
    fn names_follow_insertion_order() {
        let mp = multi(vec![Fixed::ok(1.0), Fixed::ok(2.0)]);
        assert_eq!(mp.len(), 2);
        assert!(!mp.is_empty());
        assert_eq!(mp.names().collect::<Vec<_>>(), ["fixed", "fixed"]);
    }
}
