//! Output filename derivation: extension swap, slugs, and bulk-rename
//! patterns.
//!
//! Two naming modes exist. The default keeps the source name and swaps the
//! extension (`photo.JPG` → `photo.webp`). Bulk rename replaces all names
//! with an SEO-friendly slug plus an index, in one of four patterns:
//!
//! - `slug-1`       → `du-hoc-uc-1.webp`
//! - `slug-001`     → `du-hoc-uc-001.webp` (zero-padded)
//! - `1-slug`       → `1-du-hoc-uc.webp`
//! - `slug-image-1` → `du-hoc-uc-image-1.webp`
//!
//! The slug generator folds Vietnamese diacritics to ASCII before the usual
//! lowercase-and-dash treatment, so Vietnamese marketing copy produces clean
//! URLs (`Học bổng du học Úc` → `hoc-bong-du-hoc-uc`).

use serde::{Deserialize, Serialize};

/// Derive the output filename by swapping the final extension for `.webp`.
///
/// Only the last dot-separated segment is treated as an extension:
/// `a.b.png` → `a.b.webp`. Names without an extension get `.webp` appended.
pub fn webp_file_name(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(i) if !original[i + 1..].is_empty() && !original[i + 1..].contains('/') => {
            &original[..i]
        }
        _ => original,
    };
    format!("{stem}.webp")
}

/// Fold a single Vietnamese character to its ASCII base letter.
///
/// Covers the precomposed Vietnamese vowels (tone + quality marks) and đ/Đ.
/// Characters outside the table pass through unchanged.
fn fold_vietnamese(c: char) -> char {
    match c {
        'à' | 'á' | 'ạ' | 'ả' | 'ã' | 'â' | 'ầ' | 'ấ' | 'ậ' | 'ẩ' | 'ẫ' | 'ă' | 'ằ' | 'ắ'
        | 'ặ' | 'ẳ' | 'ẵ' => 'a',
        'è' | 'é' | 'ẹ' | 'ẻ' | 'ẽ' | 'ê' | 'ề' | 'ế' | 'ệ' | 'ể' | 'ễ' => 'e',
        'ì' | 'í' | 'ị' | 'ỉ' | 'ĩ' => 'i',
        'ò' | 'ó' | 'ọ' | 'ỏ' | 'õ' | 'ô' | 'ồ' | 'ố' | 'ộ' | 'ổ' | 'ỗ' | 'ơ' | 'ờ' | 'ớ'
        | 'ợ' | 'ở' | 'ỡ' => 'o',
        'ù' | 'ú' | 'ụ' | 'ủ' | 'ũ' | 'ư' | 'ừ' | 'ứ' | 'ự' | 'ử' | 'ữ' => 'u',
        'ỳ' | 'ý' | 'ỵ' | 'ỷ' | 'ỹ' => 'y',
        'đ' => 'd',
        'À' | 'Á' | 'Ạ' | 'Ả' | 'Ã' | 'Â' | 'Ầ' | 'Ấ' | 'Ậ' | 'Ẩ' | 'Ẫ' | 'Ă' | 'Ằ' | 'Ắ'
        | 'Ặ' | 'Ẳ' | 'Ẵ' => 'A',
        'È' | 'É' | 'Ẹ' | 'Ẻ' | 'Ẽ' | 'Ê' | 'Ề' | 'Ế' | 'Ệ' | 'Ể' | 'Ễ' => 'E',
        'Ì' | 'Í' | 'Ị' | 'Ỉ' | 'Ĩ' => 'I',
        'Ò' | 'Ó' | 'Ọ' | 'Ỏ' | 'Õ' | 'Ô' | 'Ồ' | 'Ố' | 'Ộ' | 'Ổ' | 'Ỗ' | 'Ơ' | 'Ờ' | 'Ớ'
        | 'Ợ' | 'Ở' | 'Ỡ' => 'O',
        'Ù' | 'Ú' | 'Ụ' | 'Ủ' | 'Ũ' | 'Ư' | 'Ừ' | 'Ứ' | 'Ự' | 'Ử' | 'Ữ' => 'U',
        'Ỳ' | 'Ý' | 'Ỵ' | 'Ỷ' | 'Ỹ' => 'Y',
        'Đ' => 'D',
        other => other,
    }
}

/// Convert free text to a URL-friendly slug.
///
/// Vietnamese diacritics fold to ASCII first; then everything non-alphanumeric
/// collapses to single dashes, lowercased, with no leading/trailing dash.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().map(fold_vietnamese) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// How bulk-rename formats each filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenamePattern {
    /// `slug-1.webp`
    #[default]
    SlugNumber,
    /// `slug-001.webp` (implies zero padding)
    SlugPadded,
    /// `1-slug.webp`
    NumberSlug,
    /// `slug-image-1.webp`
    SlugImageNumber,
}

/// Bulk-rename configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSettings {
    /// Base text, slugified before use.
    pub base_slug: String,
    pub pattern: RenamePattern,
    /// First index assigned (usually 1).
    pub start_index: usize,
    /// Pad indexes with zeros to a uniform width.
    pub zero_padding: bool,
    /// Separator between slug and index.
    pub separator: String,
}

impl Default for RenameSettings {
    fn default() -> Self {
        Self {
            base_slug: String::new(),
            pattern: RenamePattern::default(),
            start_index: 1,
            zero_padding: false,
            separator: "-".into(),
        }
    }
}

impl RenameSettings {
    /// Rename is active only with a non-empty slug.
    pub fn is_enabled(&self) -> bool {
        !self.base_slug.trim().is_empty()
    }
}

/// Generate one filename for position `index` out of `total_count` images.
///
/// Padding width is at least two digits and grows with the batch size
/// (`total_count = 150` pads to three).
pub fn generate_file_name(settings: &RenameSettings, index: usize, total_count: usize) -> String {
    let slug = slugify(&settings.base_slug);
    let pad = settings.zero_padding || settings.pattern == RenamePattern::SlugPadded;

    let formatted_index = if pad {
        let width = total_count.to_string().len().max(2);
        format!("{index:0width$}")
    } else {
        index.to_string()
    };

    let sep = &settings.separator;
    match settings.pattern {
        RenamePattern::SlugNumber | RenamePattern::SlugPadded => {
            format!("{slug}{sep}{formatted_index}.webp")
        }
        RenamePattern::NumberSlug => format!("{formatted_index}{sep}{slug}.webp"),
        RenamePattern::SlugImageNumber => format!("{slug}{sep}image{sep}{formatted_index}.webp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // webp_file_name
    // =========================================================================

    #[test]
    fn swaps_extension_case_insensitively() {
        assert_eq!(webp_file_name("photo.JPG"), "photo.webp");
        assert_eq!(webp_file_name("photo.jpeg"), "photo.webp");
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(webp_file_name("a.b.png"), "a.b.webp");
    }

    #[test]
    fn no_extension_appends_webp() {
        assert_eq!(webp_file_name("photo"), "photo.webp");
    }

    #[test]
    fn trailing_dot_is_preserved_as_stem() {
        assert_eq!(webp_file_name("photo."), "photo..webp");
    }

    // =========================================================================
    // slugify
    // =========================================================================

    #[test]
    fn vietnamese_text_folds_to_ascii() {
        assert_eq!(slugify("Học bổng du học Úc"), "hoc-bong-du-hoc-uc");
        assert_eq!(slugify("Đà Nẵng"), "da-nang");
    }

    #[test]
    fn punctuation_collapses_to_single_dash() {
        assert_eq!(slugify("hello,  world!!"), "hello-world");
        assert_eq!(slugify("a...b"), "a-b");
    }

    #[test]
    fn leading_and_trailing_separators_trimmed() {
        assert_eq!(slugify("  du học  "), "du-hoc");
        assert_eq!(slugify("---x---"), "x");
    }

    #[test]
    fn empty_input_gives_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    // =========================================================================
    // generate_file_name
    // =========================================================================

    fn settings(pattern: RenamePattern, zero_padding: bool) -> RenameSettings {
        RenameSettings {
            base_slug: "Du học Úc".into(),
            pattern,
            start_index: 1,
            zero_padding,
            separator: "-".into(),
        }
    }

    #[test]
    fn slug_number_pattern() {
        let name = generate_file_name(&settings(RenamePattern::SlugNumber, false), 1, 5);
        assert_eq!(name, "du-hoc-uc-1.webp");
    }

    #[test]
    fn slug_padded_pattern_pads_to_two_minimum() {
        let name = generate_file_name(&settings(RenamePattern::SlugPadded, false), 1, 5);
        assert_eq!(name, "du-hoc-uc-01.webp");
    }

    #[test]
    fn padding_width_grows_with_batch_size() {
        let name = generate_file_name(&settings(RenamePattern::SlugNumber, true), 7, 150);
        assert_eq!(name, "du-hoc-uc-007.webp");
    }

    #[test]
    fn number_slug_pattern() {
        let name = generate_file_name(&settings(RenamePattern::NumberSlug, false), 3, 5);
        assert_eq!(name, "3-du-hoc-uc.webp");
    }

    #[test]
    fn slug_image_number_pattern() {
        let name = generate_file_name(&settings(RenamePattern::SlugImageNumber, false), 2, 5);
        assert_eq!(name, "du-hoc-uc-image-2.webp");
    }

    #[test]
    fn custom_separator() {
        let mut s = settings(RenamePattern::SlugNumber, false);
        s.separator = "_".into();
        assert_eq!(generate_file_name(&s, 1, 5), "du-hoc-uc_1.webp");
    }

    #[test]
    fn rename_enabled_requires_nonblank_slug() {
        assert!(!RenameSettings::default().is_enabled());
        assert!(!RenameSettings {
            base_slug: "   ".into(),
            ..Default::default()
        }
        .is_enabled());
        assert!(settings(RenamePattern::SlugNumber, false).is_enabled());
    }
}
