//! Naming conventions of the on-disk store.
//!
//! These are a compatibility contract with data captured before this
//! crate existed: sample directories concatenate the label and a
//! decimal index with no separator, frame files append `_f<index>` and
//! the `.npy` extension the numpy writer added.

/// Directory entries ignored when enumerating samples. `.DS_Store` is
/// the Finder metadata file that litters datasets captured on macOS.
pub const IGNORED_ENTRIES: &[&str] = &[".DS_Store"];

/// Directory name for a sample: label and index, no separator.
///
/// # Example
///
/// ```
/// use gesture_store::layout::sample_dir_name;
///
/// assert_eq!(sample_dir_name("Heart", 12), "Heart12");
/// ```
pub fn sample_dir_name(label: &str, index: u64) -> String {
    format!("{label}{index}")
}

/// File name for one frame of a sample.
///
/// # Example
///
/// ```
/// use gesture_store::layout::frame_file_name;
///
/// assert_eq!(frame_file_name("Heart12", 0), "Heart12_f0.npy");
/// ```
pub fn frame_file_name(sample: &str, frame_index: usize) -> String {
    format!("{sample}_f{frame_index}.npy")
}

/// Returns `true` for directory entries that are filesystem artifacts
/// rather than samples.
pub fn is_ignored_entry(name: &str) -> bool {
    IGNORED_ENTRIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dir_concatenates_label_and_index() {
        assert_eq!(sample_dir_name("A", 0), "A0");
        assert_eq!(sample_dir_name("ThankYou", 130), "ThankYou130");
    }

    #[test]
    fn frame_file_carries_sample_prefix_and_extension() {
        assert_eq!(frame_file_name("A0", 9), "A0_f9.npy");
    }

    #[test]
    fn ds_store_is_ignored() {
        assert!(is_ignored_entry(".DS_Store"));
        assert!(!is_ignored_entry("Heart3"));
    }
}
