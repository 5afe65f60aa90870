use std::io::Cursor;

use crate::MetadataSummary;

pub struct ExifSummarizer;

impl ExifSummarizer {
    /// Reads the EXIF container from the original image bytes and condenses
    /// it into the summary carried on the analysis result. Missing or
    /// unparsable EXIF is not an error; it simply yields `has_exif = false`.
    /// Plausibility flags are copied in from the metadata signal.
    pub fn summarize(bytes: &[u8], flags: Vec<String>) -> MetadataSummary {
        let mut cursor = Cursor::new(bytes);

        match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(data) => Self::condense(&data, flags),
            Err(_) => MetadataSummary {
                has_exif: false,
                camera: None,
                software: None,
                date_time: None,
                flags,
            },
        }
    }

    fn condense(data: &exif::Exif, flags: Vec<String>) -> MetadataSummary {
        let field_text = |tag: exif::Tag| {
            data.get_field(tag, exif::In::PRIMARY)
                .map(|f| f.display_value().to_string())
        };

        let camera = field_text(exif::Tag::Model).or_else(|| field_text(exif::Tag::Make));
        let software = field_text(exif::Tag::Software);
        let date_time = field_text(exif::Tag::DateTime);

        MetadataSummary {
            has_exif: true,
            camera,
            software,
            date_time,
            flags,
        }
    }
}
