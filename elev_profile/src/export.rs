//! CSV writers for profiles and gradient series.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{GradientPoint, Profile, ProfileError};

/// Write `distance,elevation` rows; missing elevations are written as `NaN`.
pub fn write_profile<W: Write>(profile: &Profile, writer: W) -> Result<(), ProfileError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["distance", "elevation"])?;
    for sample in profile.iter() {
        writer.write_record([
            sample.distance.to_string(),
            sample
                .elevation
                .map_or_else(|| "NaN".to_string(), |e| e.to_string()),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_profile_csv(profile: &Profile, path: &Path) -> Result<(), ProfileError> {
    write_profile(profile, File::create(path)?)
}

pub fn write_gradient<W: Write>(gradient: &[GradientPoint], writer: W) -> Result<(), ProfileError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["distance", "gradient_pct"])?;
    for point in gradient {
        writer.write_record([
            format!("{:.3}", point.distance),
            format!("{:.3}", point.percent),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_gradient_csv(gradient: &[GradientPoint], path: &Path) -> Result<(), ProfileError> {
    write_gradient(gradient, File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_table;
    use crate::Sample;

    #[test]
    fn profile_csv_reads_back() {
        let profile = Profile::new(vec![
            Sample::new(0.0, 12.5),
            Sample::missing(2.5),
            Sample::new(5.0, 13.0),
        ]);
        let mut buf = Vec::new();
        write_profile(&profile, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("distance,elevation\n0,12.5\n2.5,NaN\n"));
        assert_eq!(parse_table(buf.as_slice()).unwrap(), profile);
    }

    #[test]
    fn gradient_csv_rows() {
        let gradient = [GradientPoint {
            distance: 10.0,
            percent: -2.5,
        }];
        let mut buf = Vec::new();
        write_gradient(&gradient, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "distance,gradient_pct\n10.000,-2.500\n"
        );
    }

    #[test]
    fn profile_csv_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("profile.csv");
        write_profile_csv(&Profile::new(vec![Sample::new(1.0, 2.0)]), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "distance,elevation\n1,2\n");
    }
}
