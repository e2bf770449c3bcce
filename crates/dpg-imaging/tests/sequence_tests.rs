//! Table-driven tests for master-file rename planning.

mod common;

use common::master_files;
use dpg_imaging::config::NamingConfig;
use dpg_imaging::sequence::{compute_rename_plan, SequenceNormalizer, UnitId};
use dpg_imaging::{SequenceError, UnitView};

/// Represents a single rename planning test case.
struct RenameTestCase {
    /// Test case name for identification.
    name: &'static str,
    /// Unit id as entered by the user.
    unit: &'static str,
    /// File names in display order.
    files: &'static [&'static str],
    /// Expected (index, new name) pairs in plan order.
    expected: &'static [(usize, &'static str)],
}

const RENAME_TESTS: &[RenameTestCase] = &[
    RenameTestCase {
        name: "already_sequenced",
        unit: "42",
        files: &["000000042_0001.tif", "000000042_0002.tif"],
        expected: &[],
    },
    RenameTestCase {
        name: "swapped_plus_garbage",
        unit: "42",
        files: &["000000042_0002.tif", "000000042_0001.tif", "garbage.tif"],
        expected: &[
            (0, "000000042_0001.tif"),
            (1, "000000042_0002.tif"),
            (2, "000000042_0003.tif"),
        ],
    },
    RenameTestCase {
        name: "gap_after_delete",
        unit: "42",
        files: &["000000042_0001.tif", "000000042_0003.tif", "000000042_0004.tif"],
        expected: &[(1, "000000042_0002.tif"), (2, "000000042_0003.tif")],
    },
    RenameTestCase {
        name: "unpadded_unit_prefix",
        unit: "42",
        files: &["42_0001.tif"],
        expected: &[(0, "000000042_0001.tif")],
    },
    RenameTestCase {
        name: "pre_padded_unit_id",
        unit: "000000042",
        files: &["000000042_0001.tif"],
        expected: &[],
    },
    RenameTestCase {
        name: "five_digit_page",
        unit: "42",
        files: &["000000042_00001.tif"],
        expected: &[(0, "000000042_0001.tif")],
    },
    RenameTestCase {
        name: "non_numeric_page",
        unit: "42",
        files: &["000000042_000a.tif"],
        expected: &[(0, "000000042_0001.tif")],
    },
    RenameTestCase {
        name: "extra_separator",
        unit: "42",
        files: &["000000042_0001_v2.tif"],
        expected: &[(0, "000000042_0001.tif")],
    },
    RenameTestCase {
        name: "mixed_case_is_fine",
        unit: "42",
        files: &["000000042_0001.Tif"],
        expected: &[],
    },
    RenameTestCase {
        name: "empty_name",
        unit: "42",
        files: &[""],
        expected: &[(0, "000000042_0001.tif")],
    },
];

#[test]
fn test_rename_cases() {
    for case in RENAME_TESTS {
        let files = master_files(42, case.files);
        let plan = compute_rename_plan(case.unit, &files);

        let actual: Vec<(String, String)> = plan
            .iter()
            .map(|e| (e.original.clone(), e.new_name.clone()))
            .collect();
        let expected: Vec<(String, String)> = case
            .expected
            .iter()
            .map(|(idx, name)| (files[*idx].path.clone(), name.to_string()))
            .collect();

        assert_eq!(actual, expected, "Test '{}'", case.name);
    }
}

#[test]
fn test_plan_is_idempotent_for_arbitrary_names() {
    let pool = [
        "000000042_0001.tif",
        "000000042_0002.tif",
        "000000042_0017.tif",
        "000000041_0003.tif",
        "IMG_0001.TIF",
        "scan.tif",
        "000000042_1.tif",
        "000000042-0004.tif",
        "000000042_0005.jpg",
        "a_b_c.tif",
        "",
    ];

    for len in 0..=pool.len() {
        for shift in 0..pool.len() {
            let names: Vec<&str> = (0..len)
                .map(|i| pool[(i * 7 + shift) % pool.len()])
                .collect();
            let mut files = master_files(42, &names);
            // Keep paths unique so each plan entry maps back to one record.
            for (i, mf) in files.iter_mut().enumerate() {
                mf.path = format!("{}#{}", mf.path, i);
            }

            let plan = compute_rename_plan(42u64, &files);
            plan.apply(&mut files);
            let second = compute_rename_plan(42u64, &files);
            assert!(
                second.is_empty(),
                "len {} shift {}: second plan {:?}",
                len,
                shift,
                second
            );
        }
    }
}

#[test]
fn test_unit_view_rename_after_drag_drop() {
    let files = master_files(
        7,
        &[
            "000000007_0001.tif",
            "000000007_0002.tif",
            "000000007_0003.tif",
            "000000007_0004.tif",
        ],
    );
    let mut view = UnitView::new(7u64, files, 2);
    view.set_page(2);
    assert!(view.reorder_page(1, 0));

    let plan = view.rename_plan(&SequenceNormalizer::default());
    let new_names: Vec<&str> = plan.iter().map(|e| e.new_name.as_str()).collect();
    assert_eq!(new_names, vec!["000000007_0003.tif", "000000007_0004.tif"]);
    assert!(plan.entries()[0].original.ends_with("000000007_0004.tif"));
}

#[test]
fn test_configured_naming_round_trip() {
    let naming = NamingConfig {
        unit_pad_width: 6,
        page_pad_width: 3,
        master_extension: "tiff".to_string(),
    };
    let normalizer = SequenceNormalizer::new(naming);
    let unit = UnitId::from(315u64);
    let mut files = master_files(315, &["b.tiff", "a.tiff", "000315_002.tiff"]);

    let plan = normalizer.rename_plan(&unit, &files);
    assert_eq!(plan.len(), 3);
    plan.apply(&mut files);

    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["000315_001.tiff", "000315_002.tiff", "000315_003.tiff"]);
    assert_eq!(normalizer.validate(&unit, names), Ok(3));
}

#[test]
fn test_validate_reports_foreign_unit() {
    let normalizer = SequenceNormalizer::default();
    let err = normalizer
        .validate(&UnitId::from(42u64), ["000000042_0001.tif", "scan.tif"])
        .unwrap_err();
    assert!(matches!(
        err,
        SequenceError::InvalidName { ref file_name, .. } if file_name == "scan.tif"
    ));
}
