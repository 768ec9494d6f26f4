use treemapper_core::mapper::treemap;
use treemapper_core::scheme::parse_color_table;
use treemapper_core::svg::SvgDocument;
use treemapper_core::{Nest, Rect, RenderContext, RenderOptions};

const DESSERTS: &str = r#"{"Cake": {"Chocolate": 10, "Carrot": 4}, "Ice Cream": 15}"#;

#[test]
fn json_in_svg_out() {
    let nest = Nest::from_str(DESSERTS).unwrap();
    let out = std::env::temp_dir().join("treemapper_pipeline_test.svg");
    let options = RenderOptions {
        output: Some(out.clone()),
        ..Default::default()
    };

    let mut svg = SvgDocument::new(300, 100, &options);
    let mut ctx = RenderContext::new(&options);
    ctx.add_renderer(&mut svg);
    treemap(&nest, Rect::from_size(300.0, 100.0), &mut ctx).unwrap();
    ctx.finish().unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    std::fs::remove_file(&out).ok();
    assert_eq!(written, svg.content());

    assert!(written.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="100">"#));
    assert!(written.ends_with("</svg>\n"));
    assert!(written.contains(r#"<g class="group Cake">"#));
    assert!(written.contains("<title>Cake: 14</title>"));
    assert!(written.contains(r#"class="tile Chocolate""#));
    assert!(written.contains(r#"class="tile Ice_Cream""#));
    // Generated rule pairs for every distinct tile key, one each
    for key in ["Chocolate", "Carrot", "Ice_Cream"] {
        assert_eq!(written.matches(&format!("\n.{key} {{ fill:")).count(), 1, "{key}");
        assert_eq!(written.matches(&format!("\ntext.{key} {{ fill:")).count(), 1, "{key}");
    }
    // Group keys color descendants through inheritance, not own rules
    assert_eq!(written.matches("\n.Cake { fill:").count(), 0);
}

#[test]
fn color_table_seeds_both_rules_and_inheritance() {
    let nest = Nest::from_str(DESSERTS).unwrap();
    let table = parse_color_table("Cake,#663300,white\n".as_bytes());
    let options = RenderOptions {
        color_table: table,
        ..Default::default()
    };

    let mut svg = SvgDocument::new(300, 100, &options);
    let mut ctx = RenderContext::new(&options);
    ctx.add_renderer(&mut svg);
    treemap(&nest, Rect::from_size(300.0, 100.0), &mut ctx).unwrap();
    ctx.finish().unwrap();

    let content = svg.content();
    // Cake's tiles inherit the table color; Ice Cream gets a generated one
    assert!(content.contains(".Chocolate { fill: #663300; }"));
    assert!(content.contains(".Carrot { fill: #663300; }"));
    assert!(content.contains(".Ice_Cream { fill: #"));
    assert!(!content.contains(".Ice_Cream { fill: #663300; }"));
}

#[test]
fn sorted_input_lays_out_largest_first() {
    let nest = Nest::from_str("[12, 13, 10]").unwrap().ordered();
    let options = RenderOptions::default();

    let mut svg = SvgDocument::new(300, 100, &options);
    let mut ctx = RenderContext::new(&options);
    ctx.add_renderer(&mut svg);
    treemap(&nest, Rect::from_size(300.0, 100.0), &mut ctx).unwrap();
    ctx.finish().unwrap();

    let content = svg.content();
    let pos_13 = content.find("<tspan>13</tspan>").unwrap();
    let pos_12 = content.find("<tspan>12</tspan>").unwrap();
    let pos_10 = content.find("<tspan>10</tspan>").unwrap();
    assert!(pos_13 < pos_12 && pos_12 < pos_10);
}

#[test]
fn user_style_sheet_passes_through_whole_pipeline() {
    let nest = Nest::from_str(DESSERTS).unwrap();
    let options = RenderOptions {
        style_sheet: Some(".Cake { fill: papayawhip; }\n".to_owned()),
        ..Default::default()
    };

    let mut svg = SvgDocument::new(300, 100, &options);
    let mut ctx = RenderContext::new(&options);
    ctx.add_renderer(&mut svg);
    treemap(&nest, Rect::from_size(300.0, 100.0), &mut ctx).unwrap();
    ctx.finish().unwrap();

    let content = svg.content();
    assert!(content.contains(".Cake { fill: papayawhip; }"));
    assert!(!content.contains(".Chocolate { fill:"));
}
