use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::source::{Dataset, DatasetSource, ListingSource, SourceBackend};

/// Seeds a source with `dataset`. An existing dataset is only replaced with
/// `force`.
pub fn run<B: SourceBackend>(source: &mut DatasetSource<B>, dataset: &Dataset, force: bool) -> Result<CmdResult> {
    let existing = source.search_listings(&FilterSet::new(), 1, 1)?.total;
    if existing > 0 && !force {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "{} already holds {} listings; use --force to replace them",
            source.backend().describe(),
            existing
        ))));
    }

    source.import(dataset)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Imported {} listings and {} attributes into {}",
        dataset.listings.len(),
        dataset.attributes.len(),
        source.backend().describe()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::source::memory::InMemorySource;
    use crate::source::sample_dataset;

    #[test]
    fn imports_into_empty_source() {
        let mut source = InMemorySource::new();
        let data = sample_dataset().unwrap();
        let result = run(&mut source, &data, false).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(source.search_listings(&FilterSet::new(), 1, 50).unwrap().total, 12);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let mut source = InMemorySource::new();
        let data = sample_dataset().unwrap();
        run(&mut source, &data, false).unwrap();

        let result = run(&mut source, &Dataset::default(), false).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(source.search_listings(&FilterSet::new(), 1, 50).unwrap().total, 12);

        run(&mut source, &Dataset::default(), true).unwrap();
        assert_eq!(source.search_listings(&FilterSet::new(), 1, 50).unwrap().total, 0);
    }
}
