use wayfinder::errors::{WayfinderError, WayfinderResult};
use wayfinder::terrain::coordinates::GridCoord;

/// Generic parser for delimited strings of unsigned integers
pub fn parse_delimited<const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
) -> WayfinderResult<[u32; N]> {
    let parts: Vec<&str> = input.split(delimiter).collect();
    if parts.len() != N {
        return Err(WayfinderError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [0; N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = part
            .trim()
            .parse()
            .map_err(|_| WayfinderError::InvalidArgument {
                reason: format!("Invalid {type_name} value: '{part}'"),
            })?;
    }

    Ok(result)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> WayfinderResult<(u32, u32)> {
    let [width, height] = parse_delimited::<2>(size_str, 'x', "size")?;

    if width == 0 || height == 0 {
        return Err(WayfinderError::InvalidArgument {
            reason: "Width and height must be greater than 0".to_string(),
        });
    }

    Ok((width, height))
}

/// Parse grid cell string "X,Y"
pub fn parse_coord(coord_str: &str) -> WayfinderResult<GridCoord> {
    let [x, y] = parse_delimited::<2>(coord_str, ',', "cell")?;
    Ok(GridCoord::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x64").unwrap(), (64, 64));
        assert_eq!(parse_size("128x256").unwrap(), (128, 256));
        assert_eq!(parse_size("1x1").unwrap(), (1, 1));

        assert!(parse_size("64").is_err());
        assert!(parse_size("0x64").is_err());
        assert!(parse_size("64x-1").is_err());
        assert!(parse_size("12.5x64").is_err());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4").unwrap(), GridCoord::new(3, 4));
        assert_eq!(parse_coord("0, 17").unwrap(), GridCoord::new(0, 17));

        assert!(parse_coord("3").is_err());
        assert!(parse_coord("3,4,5").is_err());
        assert!(parse_coord("a,b").is_err());
    }
}
