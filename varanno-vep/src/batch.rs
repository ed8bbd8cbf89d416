//! Batched annotation of a record stream.
//!
//! Records are pulled from the source lazily, grouped into fixed-size batches and
//! sent to an [EnrichmentService] one batch at a time. Annotations come out in input
//! order; batch `k + 1` is not requested before every annotation of batch `k` has
//! been handed to the caller.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use log::info;

use varanno_core::errors::AlleleError;
use varanno_core::models::{Annotation, Record};

use super::assembler::annotation_factory;
use super::consts::DEFAULT_BATCH_SIZE;
use super::realign::realign_results;
use super::service::EnrichmentService;

/// Counters of a finished or ongoing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub batches: usize,
    pub records: usize,
}

///
/// Groups records into batches and annotates each batch with a single service call.
///
/// # Examples
///
/// ```rust
/// use varanno_vep::batch::BatchAnnotator;
/// use varanno_vep::result::EnrichmentResult;
///
/// let service = |notations: &[String]| -> anyhow::Result<Vec<EnrichmentResult>> {
///     Ok(notations.iter().map(|_| EnrichmentResult::no_data()).collect())
/// };
/// let annotator = BatchAnnotator::new(&service).with_batch_size(10);
/// assert_eq!(annotator.batch_size(), 10);
/// ```
pub struct BatchAnnotator<'s, S: EnrichmentService + ?Sized> {
    service: &'s S,
    batch_size: usize,
}

impl<'s, S: EnrichmentService + ?Sized> BatchAnnotator<'s, S> {
    pub fn new(service: &'s S) -> Self {
        BatchAnnotator {
            service,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the number of records per service call (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    ///
    /// Annotate a bounded slice of records with a single service call.
    ///
    /// # Returns
    /// - one annotation per record, in the order of `records`
    pub fn annotate_batch(&self, records: &[Record]) -> Result<Vec<Annotation>> {
        let annotations = dispatch(self.service, records)?
            .into_iter()
            .collect::<Result<Vec<_>, AlleleError>>()?;
        Ok(annotations)
    }

    ///
    /// Lazily annotate a stream of records.
    ///
    /// A failed record ends the stream: the annotations of the records before it are
    /// yielded first, then the error. A failed service call ends the stream as well.
    /// An allele string that cannot be classified only fails its own annotation.
    pub fn annotate<I, E>(&self, records: I) -> Annotations<'s, I::IntoIter, S>
    where
        I: IntoIterator<Item = Result<Record, E>>,
        E: Into<anyhow::Error>,
    {
        Annotations {
            service: self.service,
            batch_size: self.batch_size,
            records: records.into_iter(),
            pending: VecDeque::with_capacity(self.batch_size),
            stats: BatchStats::default(),
            done: false,
        }
    }
}

/// Iterator returned by [BatchAnnotator::annotate].
pub struct Annotations<'s, I, S: EnrichmentService + ?Sized> {
    service: &'s S,
    batch_size: usize,
    records: I,
    pending: VecDeque<Result<Annotation>>,
    stats: BatchStats,
    done: bool,
}

impl<I, S: EnrichmentService + ?Sized> Annotations<'_, I, S> {
    /// Batches dispatched and records annotated so far.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }
}

impl<I, E, S> Annotations<'_, I, S>
where
    I: Iterator<Item = Result<Record, E>>,
    E: Into<anyhow::Error>,
    S: EnrichmentService + ?Sized,
{
    fn fill(&mut self) {
        let mut batch = Vec::with_capacity(self.batch_size);
        let mut failure = None;

        while batch.len() < self.batch_size {
            match self.records.next() {
                Some(Ok(record)) => batch.push(record),
                Some(Err(err)) => {
                    failure = Some(err.into());
                    self.done = true;
                    break;
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if !batch.is_empty() {
            match dispatch(self.service, &batch) {
                Ok(annotations) => {
                    self.stats.batches += 1;
                    self.stats.records += batch.len();
                    info!(
                        "Annotated batch {} ({} variants, {} total)",
                        self.stats.batches,
                        batch.len(),
                        self.stats.records
                    );
                    self.pending
                        .extend(annotations.into_iter().map(|a| a.map_err(anyhow::Error::from)));
                }
                Err(err) => {
                    self.pending.push_back(Err(err));
                    self.done = true;
                    return;
                }
            }
        }

        if let Some(err) = failure {
            self.pending.push_back(Err(err));
        }
    }
}

impl<I, E, S> Iterator for Annotations<'_, I, S>
where
    I: Iterator<Item = Result<Record, E>>,
    E: Into<anyhow::Error>,
    S: EnrichmentService + ?Sized,
{
    type Item = Result<Annotation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.done {
                return None;
            }
            self.fill();
        }
    }
}

/// One service call for `records`, realigned and assembled per record.
fn dispatch<S: EnrichmentService + ?Sized>(
    service: &S,
    records: &[Record],
) -> Result<Vec<Result<Annotation, AlleleError>>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let notations: Vec<String> = records.iter().map(|r| r.hgvs().to_string()).collect();
    let results = service.enrich(&notations).with_context(|| {
        format!(
            "Failed to annotate {} variants starting at line {}",
            records.len(),
            records[0].line_no
        )
    })?;
    let results = realign_results(&notations, results);

    Ok(records
        .iter()
        .zip(results.iter())
        .map(|(record, result)| annotation_factory(record, result))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;
    use std::cell::RefCell;
    use varanno_core::models::RawRecord;

    use crate::result::EnrichmentResult;

    fn record(pos: u64) -> Record {
        Record::try_from(RawRecord {
            chrom: "1".to_string(),
            pos,
            id: ".".to_string(),
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
            qual: ".".to_string(),
            filter: "PASS".to_string(),
            info: "TC=10".to_string(),
            format: Some("GT:NV".to_string()),
            sample: Some("0/1:5".to_string()),
            line_no: pos as usize,
        })
        .unwrap()
    }

    /// Echoes every notation back and records the size of each call.
    struct Recorder {
        calls: RefCell<Vec<usize>>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl EnrichmentService for Recorder {
        fn enrich(&self, notations: &[String]) -> Result<Vec<EnrichmentResult>> {
            self.calls.borrow_mut().push(notations.len());
            Ok(notations
                .iter()
                .map(|n| EnrichmentResult::new(json!({ "input": n, "allele_string": "A/G" })))
                .collect())
        }
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(3, vec![3])]
    #[case(5, vec![5])]
    #[case(6, vec![5, 1])]
    #[case(12, vec![5, 5, 2])]
    fn test_batches_are_bounded(#[case] n: u64, #[case] expected_calls: Vec<usize>) {
        let service = Recorder::new();
        let annotator = BatchAnnotator::new(&service).with_batch_size(5);
        let records = (1..=n).map(|pos| Ok::<_, anyhow::Error>(record(pos)));

        let annotations: Vec<Annotation> = annotator
            .annotate(records)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(*service.calls.borrow(), expected_calls);
        let positions: Vec<u64> = annotations.iter().map(|a| a.pos).collect();
        assert_eq!(positions, (1..=n).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_batches_are_requested_lazily() {
        let service = Recorder::new();
        let annotator = BatchAnnotator::new(&service).with_batch_size(2);
        let mut annotations = annotator.annotate((1..=5).map(|pos| Ok::<_, anyhow::Error>(record(pos))));

        assert!(service.calls.borrow().is_empty());
        annotations.next().unwrap().unwrap();
        assert_eq!(*service.calls.borrow(), vec![2]);
        annotations.next().unwrap().unwrap();
        assert_eq!(*service.calls.borrow(), vec![2]);
        annotations.next().unwrap().unwrap();
        assert_eq!(*service.calls.borrow(), vec![2, 2]);
        assert_eq!(annotations.stats(), BatchStats { batches: 2, records: 4 });
    }

    #[rstest]
    fn test_record_error_flushes_preceding_annotations() {
        let service = Recorder::new();
        let annotator = BatchAnnotator::new(&service).with_batch_size(50);
        let records = vec![
            Ok(record(1)),
            Ok(record(2)),
            Err(anyhow::anyhow!("Invalid record format")),
            Ok(record(4)),
        ];

        let items: Vec<Result<Annotation>> = annotator.annotate(records).collect();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().pos, 1);
        assert_eq!(items[1].as_ref().unwrap().pos, 2);
        assert_eq!(items[2].as_ref().unwrap_err().to_string(), "Invalid record format");
        assert_eq!(*service.calls.borrow(), vec![2]);
    }

    #[rstest]
    fn test_service_failure_ends_stream() {
        let service = |_: &[String]| -> Result<Vec<EnrichmentResult>> {
            Err(anyhow::anyhow!("connection refused"))
        };
        let annotator = BatchAnnotator::new(&service).with_batch_size(2);
        let items: Vec<Result<Annotation>> = annotator
            .annotate((1..=5).map(|pos| Ok::<_, anyhow::Error>(record(pos))))
            .collect();

        assert_eq!(items.len(), 1);
        let err = items[0].as_ref().unwrap_err();
        assert!(format!("{:#}", err).contains("connection refused"));
    }

    #[rstest]
    fn test_annotate_batch_realigns() {
        let service = |_: &[String]| -> Result<Vec<EnrichmentResult>> {
            Ok(vec![EnrichmentResult::new(json!({
                "input": "1:g.3A>G",
                "allele_string": "A/G",
                "most_severe_consequence": "intron_variant"
            }))])
        };
        let annotator = BatchAnnotator::new(&service);

        let annotations = annotator
            .annotate_batch(&[record(1), record(2), record(3)])
            .unwrap();

        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations[0].variant_effect, None);
        assert_eq!(annotations[1].variant_effect, None);
        assert_eq!(annotations[2].variant_effect.as_deref(), Some("intron_variant"));
    }

    #[rstest]
    fn test_annotate_batch_empty_skips_service() {
        let service = Recorder::new();
        let annotations = BatchAnnotator::new(&service).annotate_batch(&[]).unwrap();
        assert!(annotations.is_empty());
        assert!(service.calls.borrow().is_empty());
    }

    #[rstest]
    fn test_batch_size_floor() {
        let service = Recorder::new();
        assert_eq!(BatchAnnotator::new(&service).batch_size(), 50);
        assert_eq!(BatchAnnotator::new(&service).with_batch_size(0).batch_size(), 1);
    }
}
