//! EMPIRE10 lung CT dataset adapter.
//!
//! `input_directory` should point at the dataset root that contains the
//! `scans` directory. The lung masks next to it are not used.
//!
//! The challenge withholds its landmarks, so no case carries point sets.

use std::path::{Path, PathBuf};

use superbench_types::CaseNumber;

use crate::constants::{EMPIRE_CASE_COUNT, EMPIRE_CATEGORY, EMPIRE_NAME};
use crate::dataset::{CaseDescriptor, Dataset, DeformationFieldNames, ImagePair, PointSetPair};
use crate::paths::empire::{EmpireCasePaths, LungMasksDir};

/// The 30 fixed/moving pairs of the EMPIRE10 challenge.
///
/// Construction only joins paths; nothing on disk is inspected until
/// [`Empire::missing_inputs`] or an evaluator asks for it.
#[derive(Debug, Clone)]
pub struct Empire {
    input_directory: PathBuf,
    case_numbers: Vec<CaseNumber>,
    image_file_names: Vec<ImagePair>,
    point_set_file_names: Vec<PointSetPair>,
    deformation_field_file_names: Vec<DeformationFieldNames>,
}

impl Empire {
    /// Builds the case catalogue for the dataset rooted at `input_directory`.
    pub fn new(input_directory: impl Into<PathBuf>) -> Self {
        let input_directory = input_directory.into();

        let case_numbers: Vec<CaseNumber> = (1..=EMPIRE_CASE_COUNT)
            .filter_map(|n| CaseNumber::new(n).ok())
            .collect();
        let mut image_file_names = Vec::with_capacity(case_numbers.len());
        let mut deformation_field_file_names = Vec::with_capacity(case_numbers.len());

        for &number in &case_numbers {
            let paths = EmpireCasePaths::new(number);

            image_file_names.push(ImagePair {
                fixed: input_directory.join(paths.fixed_scan()),
                moving: input_directory.join(paths.moving_scan()),
            });
            deformation_field_file_names.push(DeformationFieldNames {
                fixed_to_moving: paths.fixed_to_moving_field(),
                moving_to_fixed: paths.moving_to_fixed_field(),
            });
        }

        tracing::debug!(
            "built {} EMPIRE cases under {}",
            image_file_names.len(),
            input_directory.display()
        );

        Self {
            input_directory,
            case_numbers,
            image_file_names,
            point_set_file_names: Vec::new(),
            deformation_field_file_names,
        }
    }

    pub fn image_file_names(&self) -> &[ImagePair] {
        &self.image_file_names
    }

    /// Always empty for EMPIRE.
    pub fn point_set_file_names(&self) -> &[PointSetPair] {
        &self.point_set_file_names
    }

    pub fn deformation_field_file_names(&self) -> &[DeformationFieldNames] {
        &self.deformation_field_file_names
    }

    /// Returns every scan header that does not exist on disk, in case order.
    pub fn missing_inputs(&self) -> Vec<PathBuf> {
        let missing: Vec<PathBuf> = self
            .image_file_names
            .iter()
            .flat_map(|pair| [&pair.fixed, &pair.moving])
            .filter(|path| !path.is_file())
            .cloned()
            .collect();

        for path in &missing {
            tracing::warn!("missing EMPIRE scan: {}", path.display());
        }

        missing
    }

    fn descriptor_at(&self, index: usize) -> Option<CaseDescriptor> {
        Some(CaseDescriptor {
            case_number: *self.case_numbers.get(index)?,
            image_file_names: self.image_file_names.get(index)?.clone(),
            point_set_file_names: self.point_set_file_names.get(index).cloned(),
            deformation_field_file_names: self.deformation_field_file_names.get(index)?.clone(),
        })
    }
}

impl Dataset for Empire {
    fn name(&self) -> &str {
        EMPIRE_NAME
    }

    fn category(&self) -> &str {
        EMPIRE_CATEGORY
    }

    fn input_directory(&self) -> &Path {
        &self.input_directory
    }

    fn len(&self) -> usize {
        self.image_file_names.len()
    }

    fn case(&self, number: CaseNumber) -> Option<CaseDescriptor> {
        self.descriptor_at(number.index())
    }

    fn generator(&self) -> Box<dyn Iterator<Item = CaseDescriptor> + '_> {
        Box::new((0..self.len()).filter_map(move |index| self.descriptor_at(index)))
    }

    fn unused_resources(&self) -> Vec<PathBuf> {
        vec![self.input_directory.join(LungMasksDir::NAME)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn case(n: u32) -> CaseNumber {
        CaseNumber::new(n).expect("valid case number")
    }

    #[test]
    fn test_name_and_category_are_fixed() {
        for dir in ["/data/empire", "", "relative/dir"] {
            let dataset = Empire::new(dir);
            assert_eq!(dataset.name(), "EMPIRE");
            assert_eq!(dataset.category(), "Lung");
        }
    }

    #[test]
    fn test_generator_yields_thirty_cases_in_order() {
        let dataset = Empire::new("/data/empire");
        let cases: Vec<_> = dataset.generator().collect();

        assert_eq!(cases.len(), 30);
        assert_eq!(dataset.len(), 30);
        for (i, descriptor) in cases.iter().enumerate() {
            assert_eq!(descriptor.case_number.get(), i as u32 + 1);
        }
    }

    #[test]
    fn test_first_descriptor_matches_layout() {
        let dataset = Empire::new("/data/empire");
        let first = dataset.generator().next().unwrap();

        assert_eq!(
            first.image_file_names,
            ImagePair {
                fixed: PathBuf::from("/data/empire/scans/01_Fixed.mhd"),
                moving: PathBuf::from("/data/empire/scans/01_Moving.mhd"),
            }
        );
        assert_eq!(
            first.deformation_field_file_names,
            DeformationFieldNames {
                fixed_to_moving: "01_Fixed_to_Moving.mhd".into(),
                moving_to_fixed: "01_Moving_to_Fixed.mhd".into(),
            }
        );
    }

    #[test]
    fn test_every_descriptor_matches_layout() {
        let dataset = Empire::new("/data/empire");

        for (i, descriptor) in dataset.generator().enumerate() {
            let nn = format!("{:02}", i + 1);
            assert_eq!(
                descriptor.image_file_names.fixed,
                PathBuf::from(format!("/data/empire/scans/{nn}_Fixed.mhd"))
            );
            assert_eq!(
                descriptor.image_file_names.moving,
                PathBuf::from(format!("/data/empire/scans/{nn}_Moving.mhd"))
            );
            assert_eq!(
                descriptor.deformation_field_file_names.fixed_to_moving,
                format!("{nn}_Fixed_to_Moving.mhd")
            );
            assert_eq!(
                descriptor.deformation_field_file_names.moving_to_fixed,
                format!("{nn}_Moving_to_Fixed.mhd")
            );
        }
    }

    #[test]
    fn test_stored_sequences_are_aligned() {
        let dataset = Empire::new("/data/empire");

        assert_eq!(dataset.image_file_names().len(), 30);
        assert_eq!(dataset.deformation_field_file_names().len(), 30);
        let last = dataset.case(case(30)).unwrap();
        assert_eq!(last.image_file_names, dataset.image_file_names()[29]);
        assert_eq!(
            last.deformation_field_file_names,
            dataset.deformation_field_file_names()[29]
        );
    }

    #[test]
    fn test_point_sets_are_absent_for_every_case() {
        let dataset = Empire::new("/data/empire");

        assert!(dataset.point_set_file_names().is_empty());
        assert!(dataset
            .generator()
            .all(|descriptor| descriptor.point_set_file_names.is_none()));
        assert_eq!(dataset.generator().count(), 30);
    }

    #[test]
    fn test_generator_is_restartable() {
        let dataset = Empire::new("/data/empire");

        let mut first = dataset.generator();
        first.next();
        first.next();

        let second: Vec<_> = dataset.generator().collect();
        let third: Vec<_> = dataset.generator().collect();
        assert_eq!(second.len(), 30);
        assert_eq!(second, third);
        assert_eq!(second[0].case_number, case(1));
    }

    #[test]
    fn test_case_lookup_out_of_range() {
        let dataset = Empire::new("/data/empire");

        assert!(dataset.case(case(1)).is_some());
        assert!(dataset.case(case(31)).is_none());
    }

    #[test]
    fn test_construction_does_not_touch_filesystem() {
        let dataset = Empire::new("/definitely/not/a/real/path");
        assert_eq!(dataset.generator().count(), 30);
    }

    #[test]
    fn test_unused_resources_lists_lung_masks() {
        let dataset = Empire::new("/data/empire");
        assert_eq!(
            dataset.unused_resources(),
            vec![PathBuf::from("/data/empire/lungMasks")]
        );
    }

    #[test]
    fn test_missing_inputs_reports_absent_scans() {
        let temp = TempDir::new().unwrap();
        let scans = temp.path().join("scans");
        fs::create_dir_all(&scans).unwrap();

        let dataset = Empire::new(temp.path());
        assert_eq!(dataset.missing_inputs().len(), 60);

        for n in 1..=30 {
            fs::write(scans.join(format!("{n:02}_Fixed.mhd")), "NDims = 3\n").unwrap();
            fs::write(scans.join(format!("{n:02}_Moving.mhd")), "NDims = 3\n").unwrap();
        }
        fs::remove_file(scans.join("17_Moving.mhd")).unwrap();

        assert_eq!(dataset.missing_inputs(), vec![scans.join("17_Moving.mhd")]);
    }

    #[test]
    fn test_descriptor_serializes_with_mapping_keys() {
        let dataset = Empire::new("/data/empire");
        let first = dataset.case(case(1)).unwrap();

        let value = serde_json::to_value(&first).unwrap();
        assert_eq!(value["case_number"], 1);
        assert!(value["point_set_file_names"].is_null());
        assert_eq!(
            value["image_file_names"]["fixed"],
            "/data/empire/scans/01_Fixed.mhd"
        );
        assert_eq!(
            value["deformation_field_file_names"]["moving_to_fixed"],
            "01_Moving_to_Fixed.mhd"
        );
    }
}
