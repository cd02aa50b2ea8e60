// rubberband-compare/src/compare/table_builder.rs

use super::errors::ComparisonTableBuilderError;
use super::table::{CellData, ColumnSpec, ComparisonTable, RowPolicy};
use super::testrun::TestRun;
use humantime::format_duration;
use log::{debug, info, warn};
use std::time::Instant;

#[derive(Default)]
pub struct ComparisonTableBuilder<'a> {
    base: Option<&'a TestRun>,
    comparisons: Option<&'a Vec<TestRun>>,
    row_policy: Option<&'a RowPolicy>,
}

impl<'a> ComparisonTableBuilder<'a> {
    pub fn build(&self) -> Result<ComparisonTable, ComparisonTableBuilderError> {
        info!("Starting comparison table build");
        let build_start = Instant::now();

        let base = self
            .base
            .ok_or_else(|| ComparisonTableBuilderError::UninitializedFieldError("base".to_string()))?;

        debug!("Base run '{}': {} instances", base.name(), base.len());

        let comparisons = self.comparisons.ok_or_else(|| {
            ComparisonTableBuilderError::UninitializedFieldError("comparisons".to_string())
        })?;

        if comparisons.is_empty() {
            return Err(ComparisonTableBuilderError::NoComparisonRuns);
        }

        debug!("Comparison runs: {}", comparisons.len());

        let row_policy = self.row_policy.copied().unwrap_or_default();

        // Column layout follows the base run. Each comparison run maps its
        // own column positions onto the base labels, None where it lacks one.
        let columns: Vec<ColumnSpec> = base
            .columns()
            .iter()
            .map(|label| ColumnSpec::from_label(label))
            .collect();
        let column_maps = Self::map_columns(base, comparisons);

        let instances = Self::select_instances(base, comparisons, row_policy);
        if instances.is_empty() {
            return Err(ComparisonTableBuilderError::NoCommonInstances);
        }

        info!(
            "Merging {} instances x {} columns across {} comparison runs",
            instances.len(),
            columns.len(),
            comparisons.len()
        );

        let cells = Self::build_cells(base, comparisons, &column_maps, &instances, columns.len());

        let run_names = comparisons
            .iter()
            .map(|run| run.name().to_string())
            .collect();

        info!(
            "Comparison table built in {}",
            format_duration(build_start.elapsed())
        );

        Ok(ComparisonTable::new(
            base.name().to_string(),
            run_names,
            columns,
            instances,
            cells,
        ))
    }

    /// For each comparison run, position of every base column in that run's
    /// own header, by label.
    fn map_columns(base: &TestRun, comparisons: &[TestRun]) -> Vec<Vec<Option<usize>>> {
        comparisons
            .iter()
            .map(|run| {
                let map: Vec<Option<usize>> = base
                    .columns()
                    .iter()
                    .map(|label| run.column_position(label))
                    .collect();
                if map.iter().all(Option::is_none) {
                    warn!(
                        "Run '{}' shares no columns with base run '{}'",
                        run.name(),
                        base.name()
                    );
                }
                map
            })
            .collect()
    }

    fn select_instances(
        base: &TestRun,
        comparisons: &[TestRun],
        row_policy: RowPolicy,
    ) -> Vec<String> {
        match row_policy {
            RowPolicy::Intersection => base
                .instances()
                .iter()
                .filter(|instance| {
                    comparisons
                        .iter()
                        .all(|run| run.contains(instance.as_str()))
                })
                .cloned()
                .collect(),
            RowPolicy::Union => {
                let mut instances: Vec<String> = base.instances().to_vec();
                for run in comparisons {
                    for instance in run.instances() {
                        if !instances.iter().any(|seen| seen == instance) {
                            instances.push(instance.clone());
                        }
                    }
                }
                instances
            }
        }
    }

    fn build_cells(
        base: &TestRun,
        comparisons: &[TestRun],
        column_maps: &[Vec<Option<usize>>],
        instances: &[String],
        ncols: usize,
    ) -> Vec<Vec<CellData>> {
        instances
            .iter()
            .map(|instance| {
                (0..ncols)
                    .map(|col_idx| {
                        let raw = base.value(instance, col_idx).unwrap_or("").to_string();
                        let others = comparisons
                            .iter()
                            .zip(column_maps)
                            .map(|(run, map)| {
                                map.get(col_idx)
                                    .copied()
                                    .flatten()
                                    .and_then(|pos| run.value(instance, pos))
                                    .map(str::to_string)
                            })
                            .collect();
                        CellData { raw, others }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn base(&mut self, base: &'a TestRun) -> &mut Self {
        self.base = Some(base);
        self
    }

    pub fn comparisons(&mut self, comparisons: &'a Vec<TestRun>) -> &mut Self {
        self.comparisons = Some(comparisons);
        self
    }

    pub fn row_policy(&mut self, row_policy: &'a RowPolicy) -> &mut Self {
        self.row_policy = Some(row_policy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, bytes: &str) -> TestRun {
        TestRun::from_csv(name.to_string(), bytes.as_bytes()).unwrap()
    }

    fn base_run() -> TestRun {
        run(
            "base",
            "instance,Time_total,Nodes\n\
             app1,10,500\n\
             app2,20,800\n\
             app3,30,900\n",
        )
    }

    #[test]
    fn test_intersection_is_the_default() {
        let base = base_run();
        let others = vec![
            run("a", "instance,Time_total,Nodes\napp1,11,400\napp3,33,950\n"),
            run("b", "instance,Time_total,Nodes\napp1,12,300\napp2,22,850\napp3,31,700\n"),
        ];
        let table = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .build()
            .unwrap();
        // app2 is missing from run a
        assert_eq!(table.instances(), &["app1", "app3"]);
        assert_eq!(table.run_names(), &["a", "b"]);
        assert_eq!(table.ncols(), 2);
    }

    #[test]
    fn test_union_keeps_base_order_first() {
        let base = base_run();
        let others = vec![run(
            "a",
            "instance,Time_total,Nodes\nzzz,1,2\napp1,11,400\n",
        )];
        let policy = RowPolicy::Union;
        let table = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .row_policy(&policy)
            .build()
            .unwrap();
        assert_eq!(table.instances(), &["app1", "app2", "app3", "zzz"]);
        // zzz has no base value, but run a's value is carried
        let row = table.instances().iter().position(|i| i == "zzz").unwrap();
        let cell = table.cell(row, 0).unwrap();
        assert_eq!(cell.raw, "");
        assert_eq!(cell.others, vec![Some("1".to_string())]);
    }

    #[test]
    fn test_missing_column_leaves_empty_slot() {
        let base = base_run();
        let others = vec![run("a", "instance,Time_total\napp1,11\napp2,22\napp3,33\n")];
        let table = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .build()
            .unwrap();
        let nodes_col = table.column_index("Nodes").unwrap();
        let cell = table.cell(0, nodes_col).unwrap();
        assert_eq!(cell.raw, "500");
        assert_eq!(cell.others, vec![None]);
        assert!(cell.comparison_values().is_empty());
    }

    #[test]
    fn test_uninitialized_fields_are_an_error() {
        let base = base_run();
        let err = ComparisonTableBuilder::default().build().unwrap_err();
        assert!(matches!(
            err,
            ComparisonTableBuilderError::UninitializedFieldError(ref field) if field == "base"
        ));
        let err = ComparisonTableBuilder::default()
            .base(&base)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ComparisonTableBuilderError::UninitializedFieldError(ref field) if field == "comparisons"
        ));
    }

    #[test]
    fn test_empty_comparison_list_is_an_error() {
        let base = base_run();
        let others: Vec<TestRun> = vec![];
        let err = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .build()
            .unwrap_err();
        assert!(matches!(err, ComparisonTableBuilderError::NoComparisonRuns));
    }

    #[test]
    fn test_disjoint_instances_are_an_error() {
        let base = base_run();
        let others = vec![run("a", "instance,Time_total\nzzz,1\n")];
        let err = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .build()
            .unwrap_err();
        assert!(matches!(err, ComparisonTableBuilderError::NoCommonInstances));
    }

    #[test]
    fn test_cell_slots_align_with_run_order() {
        let base = base_run();
        let others = vec![
            run("a", "instance,Time_total,Nodes\napp1,11,400\napp2,21,600\napp3,31,950\n"),
            run("b", "instance,Nodes\napp1,300\napp2,850\napp3,700\n"),
        ];
        let table = ComparisonTableBuilder::default()
            .base(&base)
            .comparisons(&others)
            .build()
            .unwrap();
        let cell = table.cell(0, 0).unwrap();
        // run b has no Time_total column, so its slot stays empty
        assert_eq!(cell.others, vec![Some("11".to_string()), None]);
        let nodes = table.cell(0, 1).unwrap();
        assert_eq!(
            nodes.others,
            vec![Some("400".to_string()), Some("300".to_string())]
        );
    }
}
