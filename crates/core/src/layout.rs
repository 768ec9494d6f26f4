use crate::bisect::bisect;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::model::Nest;

/// One event in the placement stream: a tile per leaf, enter/exit
/// brackets around each named container.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Tile {
        key: Option<String>,
        value: f64,
        rect: Rect,
    },
    Enter {
        key: String,
        value: f64,
        rect: Rect,
    },
    Exit,
}

/// Recursively partition `region` among the weighted items of `nest`.
///
/// Containers of two or more children are cut in two by balanced
/// bisection, the region is split in the same weight proportion, and
/// each half recurses, left/bottom first. That keeps every tile's area
/// proportional to its weight over the whole tree while the binary
/// cuts keep tiles close to square.
pub fn layout(nest: &Nest, region: Rect) -> Result<Vec<Placement>> {
    tracing::trace!(weight = nest.weight(), ?region, "laying out");
    let mut events = Vec::new();
    place(None, nest, region, &mut events)?;
    Ok(events)
}

fn place(key: Option<&str>, nest: &Nest, region: Rect, out: &mut Vec<Placement>) -> Result<()> {
    match nest {
        Nest::Leaf(value) => {
            if !(*value > 0.0) {
                return Err(Error::EmptyOrZeroWeight);
            }
            out.push(Placement::Tile {
                key: key.map(str::to_owned),
                value: *value,
                rect: region,
            });
            Ok(())
        }
        Nest::Seq(items) => {
            let children: Vec<(Option<&str>, &Nest)> =
                items.iter().map(|child| (None, child)).collect();
            enclosed(key, nest.weight(), &children, region, out)
        }
        Nest::Map(items) => {
            let children: Vec<(Option<&str>, &Nest)> = items
                .iter()
                .map(|(name, child)| (Some(name.as_str()), child))
                .collect();
            enclosed(key, nest.weight(), &children, region, out)
        }
    }
}

/// A named container gets an enter/exit bracket; an anonymous one is
/// subdivided in place.
fn enclosed(
    key: Option<&str>,
    weight: f64,
    children: &[(Option<&str>, &Nest)],
    region: Rect,
    out: &mut Vec<Placement>,
) -> Result<()> {
    match key {
        Some(key) => {
            out.push(Placement::Enter {
                key: key.to_owned(),
                value: weight,
                rect: region,
            });
            subdivide(children, region, out)?;
            out.push(Placement::Exit);
            Ok(())
        }
        None => subdivide(children, region, out),
    }
}

fn subdivide(
    children: &[(Option<&str>, &Nest)],
    region: Rect,
    out: &mut Vec<Placement>,
) -> Result<()> {
    if children.is_empty() {
        return Err(Error::EmptyOrZeroWeight);
    }
    let weights: Vec<f64> = children.iter().map(|(_, child)| child.weight()).collect();
    if weights.iter().any(|w| !(*w > 0.0)) {
        return Err(Error::EmptyOrZeroWeight);
    }
    if let [(key, child)] = children {
        return place(*key, child, region, out);
    }
    let cut = bisect(&weights)?;
    let left: f64 = weights[..cut].iter().sum();
    let total: f64 = weights.iter().sum();
    let (left_region, right_region) = region.split(left / total)?;
    subdivide(&children[..cut], left_region, out)?;
    subdivide(&children[cut..], right_region, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn tiles(events: &[Placement]) -> Vec<(&Option<String>, f64, Rect)> {
        events
            .iter()
            .filter_map(|ev| match ev {
                Placement::Tile { key, value, rect } => Some((key, *value, *rect)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn flat_list_widths_match_weight_ratio() {
        let nest = Nest::from_str("[12, 13, 10]").unwrap();
        let region = Rect::from_size(300.0, 100.0);
        let events = layout(&nest, region).unwrap();
        let tiles = tiles(&events);
        assert_eq!(tiles.len(), 3);
        for (_, value, rect) in &tiles {
            assert!((rect.width() - 300.0 * value / 35.0).abs() < 1e-9);
            assert_eq!(rect.height(), 100.0);
        }
        // Left to right in input order, tiling the region exactly
        assert_eq!(tiles[0].2.ll, Point::new(0.0, 0.0));
        assert_eq!(tiles[0].2.ur.x, tiles[1].2.ll.x);
        assert_eq!(tiles[1].2.ur.x, tiles[2].2.ll.x);
        assert_eq!(tiles[2].2.ur, Point::new(300.0, 100.0));
    }

    #[test]
    fn areas_stay_proportional_in_nested_trees() {
        let nest = Nest::from_str("[[7, 3], [1, [2, 7]], 10]").unwrap();
        let region = Rect::from_size(200.0, 150.0);
        let events = layout(&nest, region).unwrap();
        let tiles = tiles(&events);
        let total = nest.weight();
        let mut covered = 0.0;
        for (_, value, rect) in &tiles {
            assert!((rect.area() / region.area() - value / total).abs() < 1e-9);
            covered += rect.area();
        }
        assert!((covered - region.area()).abs() < 1e-6);
    }

    #[test]
    fn named_containers_are_bracketed() {
        let nest =
            Nest::from_str(r#"{"Cake": {"Chocolate": 10, "Carrot": 4}, "Ice Cream": 15}"#).unwrap();
        let events = layout(&nest, Rect::from_size(300.0, 100.0)).unwrap();
        let shape: Vec<String> = events
            .iter()
            .map(|ev| match ev {
                Placement::Enter { key, .. } => format!("enter {key}"),
                Placement::Tile { key, .. } => {
                    format!("tile {}", key.as_deref().unwrap_or("-"))
                }
                Placement::Exit => "exit".to_owned(),
            })
            .collect();
        assert_eq!(
            shape,
            [
                "enter Cake",
                "tile Chocolate",
                "tile Carrot",
                "exit",
                "tile Ice Cream"
            ]
        );
    }

    #[test]
    fn group_value_is_its_total_weight() {
        let nest = Nest::from_str(r#"{"Cake": {"Chocolate": 10, "Carrot": 4}}"#).unwrap();
        let events = layout(&nest, Rect::from_size(100.0, 100.0)).unwrap();
        let Placement::Enter { key, value, rect } = &events[0] else {
            panic!("expected a group first");
        };
        assert_eq!(key, "Cake");
        assert_eq!(*value, 14.0);
        assert_eq!(*rect, Rect::from_size(100.0, 100.0));
    }

    #[test]
    fn singleton_container_fills_the_region() {
        let nest = Nest::from_str("[[42]]").unwrap();
        let region = Rect::from_size(50.0, 80.0);
        let events = layout(&nest, region).unwrap();
        assert_eq!(
            events,
            [Placement::Tile {
                key: None,
                value: 42.0,
                rect: region
            }]
        );
    }

    #[test]
    fn degenerate_trees_fail_before_any_division() {
        let region = Rect::from_size(100.0, 100.0);
        for bad in ["[]", "{}", "0", "[5, 0]", "[5, []]", "[5, [-1, 3]]"] {
            let nest = Nest::from_str(bad).unwrap();
            assert!(
                matches!(layout(&nest, region), Err(Error::EmptyOrZeroWeight)),
                "expected EmptyOrZeroWeight for {bad}"
            );
        }
    }

    #[test]
    fn nan_weights_are_rejected() {
        // Not expressible in JSON, but `layout` takes any Nest
        let region = Rect::from_size(100.0, 100.0);
        for bad in [
            Nest::Leaf(f64::NAN),
            Nest::Seq(vec![Nest::Leaf(f64::NAN)]),
            Nest::Seq(vec![Nest::Leaf(5.0), Nest::Leaf(f64::NAN)]),
        ] {
            assert!(
                matches!(layout(&bad, region), Err(Error::EmptyOrZeroWeight)),
                "expected EmptyOrZeroWeight for {bad:?}"
            );
        }
    }
}
