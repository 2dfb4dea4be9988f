//! Forest construction from tokenized input records.
//!
//! Record layout (every token an unsigned integer):
//!   1. one record: total cow count Q
//!   2. one record: M N -- counts of shared and confidential folder records
//!   3. M records:  folderId cowCount cowId x cowCount  (shared folders)
//!   4. N records:  same shape                          (confidential folders)
//!   5. one record: edge count G
//!   6. G records:  parentId childId
//!
//! Short or non-numeric input is a fatal [`CorralError::InvalidInput`];
//! there is no recovery and no partial forest.

use corral_core::error::{CorralError, CorralResult};
use corral_core::{AccessPolicy, Forest};
use corral_provider::Record;

/// Builds a [`Forest`] from the record queue.
///
/// Folders are created on first mention (access-list line or edge line)
/// and default to Shared; an access-list line naming an existing folder
/// overwrites its policy and extends its cow list.
pub fn build_forest(records: &[Record]) -> CorralResult<Forest> {
    let mut cursor = Cursor::new(records);
    let mut forest = Forest::new();

    forest.set_total_cows(parse(cursor.next("cow count")?, 0)?);

    let counts = cursor.next("folder record counts")?;
    let shared = parse(counts, 0)?;
    let confidential = parse(counts, 1)?;

    for _ in 0..shared {
        read_access_list(&mut cursor, &mut forest, AccessPolicy::Shared)?;
    }
    for _ in 0..confidential {
        read_access_list(&mut cursor, &mut forest, AccessPolicy::Confidential)?;
    }

    let edges = parse(cursor.next("edge count")?, 0)?;
    for _ in 0..edges {
        let edge = cursor.next("edge")?;
        forest.add_edge(parse(edge, 0)?, parse(edge, 1)?);
    }

    tracing::debug!(
        folders = forest.len(),
        cows = forest.total_cows(),
        edges,
        "forest built"
    );
    Ok(forest)
}

fn read_access_list(
    cursor: &mut Cursor<'_>,
    forest: &mut Forest,
    policy: AccessPolicy,
) -> CorralResult<()> {
    let record = cursor.next("folder access list")?;
    let id = parse(record, 0)?;
    let cow_count = parse(record, 1)? as usize;

    let folder = forest.get_or_create(id);
    folder.policy = policy;
    for offset in 0..cow_count {
        folder.add_cow(parse(record, 2 + offset)?);
    }
    Ok(())
}

/// Positional reader over the record queue.
struct Cursor<'a> {
    records: &'a [Record],
    next: usize,
}

impl<'a> Cursor<'a> {
    fn new(records: &'a [Record]) -> Self {
        Self { records, next: 0 }
    }

    fn next(&mut self, expected: &str) -> CorralResult<&'a Record> {
        let record = self.records.get(self.next).ok_or_else(|| {
            CorralError::InvalidInput(format!(
                "Missing record {}: expected {expected}",
                self.next + 1
            ))
        })?;
        self.next += 1;
        Ok(record)
    }
}

fn parse(record: &Record, index: usize) -> CorralResult<u64> {
    let token = record.get(index).ok_or_else(|| {
        CorralError::InvalidInput(format!("Record too short: no token at position {index}"))
    })?;
    token.parse().map_err(|_| {
        CorralError::InvalidInput(format!("Non-numeric token '{token}' at position {index}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(input: &str) -> Vec<Record> {
        input
            .lines()
            .map(|line| line.split_ascii_whitespace().map(str::to_owned).collect())
            .filter(|record: &Record| !record.is_empty())
            .collect()
    }

    #[test]
    fn builds_declared_folders_and_edges() {
        let forest = build_forest(&records(
            "3\n\
             1 1\n\
             1 2 0 1\n\
             2 1 2\n\
             1\n\
             1 2",
        ))
        .unwrap();

        assert_eq!(forest.total_cows(), 3);
        assert_eq!(forest.len(), 2);

        let shared = forest.get(1).unwrap();
        assert!(shared.is_shared());
        assert_eq!(shared.cows.as_slice(), &[0, 1]);

        let confidential = forest.get(2).unwrap();
        assert!(confidential.is_confidential());
        assert_eq!(confidential.cows.as_slice(), &[2]);
        assert_eq!(confidential.parent, Some(1));
    }

    #[test]
    fn edge_only_folders_default_to_shared() {
        let forest = build_forest(&records("1\n0 0\n1\n4 9")).unwrap();
        assert_eq!(forest.len(), 2);
        assert!(forest.get(4).unwrap().is_shared());
        assert!(forest.get(9).unwrap().is_shared());
    }

    #[test]
    fn zero_edge_input_has_no_edges() {
        let forest = build_forest(&records("2\n1 0\n5 1 0\n0")).unwrap();
        assert!(forest.get(5).unwrap().is_leaf());
    }

    #[test]
    fn missing_record_is_invalid_input() {
        let err = build_forest(&records("3\n2 0\n1 1 0")).unwrap_err();
        assert!(matches!(err, CorralError::InvalidInput(_)));
    }

    #[test]
    fn short_access_list_is_invalid_input() {
        // Declares two cows but lists only one.
        let err = build_forest(&records("3\n1 0\n1 2 0\n0")).unwrap_err();
        assert!(matches!(err, CorralError::InvalidInput(_)));
    }

    #[test]
    fn non_numeric_token_is_invalid_input() {
        let err = build_forest(&records("3\nx 0\n0")).unwrap_err();
        assert!(matches!(err, CorralError::InvalidInput(_)));
    }

    #[test]
    fn empty_record_queue_is_invalid_input() {
        let err = build_forest(&[]).unwrap_err();
        assert!(matches!(err, CorralError::InvalidInput(_)));
    }
}
