//! SVG pipeline and synthesis tests
//!
//! Registry markup in, component source out, across every dialect.

use iconsmith::component::templates;
use iconsmith::{
    synthesize, transform, A11yStrategy, ComponentName, Dialect, Framework, IconError,
    IconIdentifier, SvgDocument, TransformOptions,
};
use pretty_assertions::assert_eq;

const ARROW: &str = r#"<?xml version="1.0"?>
<!-- arrow -->
<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" class="icon">
  <path fill="none" stroke="currentColor" stroke-linecap="round" stroke-width="2" d="M5 12h14m-7-7l7 7l-7 7"/>
</svg>"#;

fn arrow_name() -> ComponentName {
    let id: IconIdentifier = "lucide:arrow-right".parse().unwrap();
    ComponentName::derive(&id).unwrap()
}

fn pipeline(framework: Framework, typescript: bool, options: &TransformOptions) -> String {
    let name = arrow_name();
    let svg = transform(&SvgDocument::new(ARROW), &name, options).unwrap();
    synthesize(&svg, &name, Dialect::new(framework, typescript))
        .unwrap()
        .expression()
        .to_string()
}

#[test]
fn test_react_uses_camel_case_attributes() {
    let expression = pipeline(Framework::React, true, &TransformOptions::default());
    assert!(expression.starts_with("(props: SVGProps<SVGSVGElement>) => (<svg "));
    assert!(expression.contains("className=\"icon\""));
    assert!(expression.contains("strokeWidth=\"2\""));
    assert!(expression.contains("aria-hidden=\"true\""));
    assert!(expression.contains("{...props}"));
    assert!(!expression.contains("<!--"));
}

#[test]
fn test_solid_keeps_svg_attributes() {
    let expression = pipeline(Framework::Solid, false, &TransformOptions::default());
    assert!(expression.starts_with("(props) => (<svg "));
    assert!(expression.contains("class=\"icon\""));
    assert!(expression.contains("stroke-width=\"2\""));
}

#[test]
fn test_labelled_icon_with_title() {
    let options = TransformOptions {
        a11y: A11yStrategy::Img,
        title: Some(arrow_name().label()),
        ..Default::default()
    };
    let expression = pipeline(Framework::Preact, true, &options);
    assert!(expression.contains("role=\"img\""));
    assert!(expression.contains("aria-label=\"Arrow Right\""));
    assert!(expression.contains("<title>Arrow Right</title>"));
}

#[test]
fn test_synthesis_is_deterministic() {
    let options = TransformOptions {
        source: Some("lucide:arrow-right".to_string()),
        ..Default::default()
    };
    assert_eq!(
        pipeline(Framework::React, true, &options),
        pipeline(Framework::React, true, &options)
    );
}

#[test]
fn test_standalone_module() {
    let name = arrow_name();
    let dialect = Dialect::new(Framework::React, true);
    let svg = transform(&SvgDocument::new(ARROW), &name, &TransformOptions::default()).unwrap();
    let definition = synthesize(&svg, &name, dialect).unwrap();

    let module = definition.to_module().unwrap();
    assert_eq!(definition.file_name(), "ArrowRight.tsx");
    assert!(module.starts_with("import type { SVGProps } from \"react\";\n\nconst ArrowRight = "));
    assert!(module.ends_with("\n\nexport default ArrowRight;\n"));
    assert_eq!(templates::PROPS_TYPE_NAME, "IconProps");
}

#[test]
fn test_non_svg_markup_is_rejected() {
    let err = transform(
        &SvgDocument::new("<html><body/></html>"),
        &arrow_name(),
        &TransformOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IconError::MalformedSvg(_)));
}
