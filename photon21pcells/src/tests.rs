//!
//! # Photon21 Parametric Cell Tests
//!

use super::*;
use crate::cells::*;
use crate::raw::{LayoutError, LayoutResult, SerializationFormat};

/// Path to sample parameter file `name`
fn params_file(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("params")
        .join(name)
}

#[test]
fn params_from_markup() -> LayoutResult<()> {
    let yaml = r#"
        cell: bend
        angle: 45
        radius: 5
    "#;
    let params: CellParams = SerializationFormat::Yaml.from_str(yaml)?;
    match &params {
        CellParams::Bend(p) => {
            assert_eq!(p.angle, 45.0);
            assert_eq!(p.width, 0.5);
        }
        _ => panic!("expected bend parameters"),
    }
    let json = r#"{"cell": "sbend", "height": -2}"#;
    let sbend: CellParams = SerializationFormat::Json.from_str(json)?;
    assert!(matches!(sbend, CellParams::SBend(ref p) if p.height == -2.0 && p.length == 20.0));

    let bad = r#"{"cell": "nope"}"#;
    assert!(SerializationFormat::Json.from_str::<CellParams>(bad).is_err());
    Ok(())
}

#[test]
fn sample_files() -> LayoutResult<()> {
    let tech = Technology::builtin()?;
    for name in ["ring.yaml", "spiral.yaml", "wireguide.json", "mmi.toml"] {
        let params = CellParams::load(params_file(name))?;
        let generator = params.generator()?;
        let (lib, comp) = generate(&tech, &generator)?;
        assert_eq!(lib.cells.len(), 1);
        assert!(lib.cell(&comp.name).is_some());
        assert!(!comp.pins.is_empty());
        assert!(comp.length > 0.0);
    }
    assert!(CellParams::load(params_file("missing.txt")).is_err());
    Ok(())
}

#[test]
fn every_generator_draws() -> LayoutResult<()> {
    let tech = Technology::builtin()?;
    let generators: Vec<Generator> = vec![
        Bend::new(BendParams::default())?.into(),
        Ring::new(RingParams::default())?.into(),
        Taper::new(TaperParams::default())?.into(),
        SBend::new(SBendParams::default())?.into(),
        Spiral::new(SpiralParams::default())?.into(),
        Mmi::new(MmiParams::default())?.into(),
        Waveguide::new(WaveguideParams::default())?.into(),
        Wireguide::new(WireguideParams::default())?.into(),
    ];
    for gen in &generators {
        let comp = gen.build(&tech)?;
        assert_eq!(comp.name, gen.name());
        // Model annotations on the devrec layer
        let model: Vec<_> = comp.texts.iter().filter(|t| t.layer == "DevRec").collect();
        assert_eq!(model.len(), 3);
        assert!(model[0].string.starts_with("Lumerical_INTERCONNECT_library="));
        assert!(model[2].string.starts_with("Spice_param:"));
        // Building is pure
        assert_eq!(comp, gen.build(&tech)?);
    }
    Ok(())
}

#[test]
fn library_roundtrip() -> LayoutResult<()> {
    let tech = Technology::builtin()?;
    let (lib, _) = generate(&tech, &Taper::new(TaperParams::default())?)?;
    let json = SerializationFormat::Json.to_string(&lib)?;
    let back: raw::Library = SerializationFormat::Json.from_str(&json)?;
    assert_eq!(back.cells[0].elems.len(), lib.cells[0].elems.len());
    assert_eq!(back.cells[0].annotations, lib.cells[0].annotations);
    Ok(())
}

#[test]
fn technology_from_file() -> LayoutResult<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("tech.yaml");
    let tech = Technology::load(&path)?;
    assert_eq!(tech, Technology::builtin()?);
    assert!(matches!(
        Technology::load(path.with_extension("txt")),
        Err(LayoutError::Validation(_))
    ));
    Ok(())
}

#[test]
fn components_use_only_technology_layers() -> LayoutResult<()> {
    let mut tech = Technology::builtin()?;
    let comp = Ring::new(RingParams::default())?.build(&tech)?;
    for p in &comp.polygons {
        tech.layer(&p.layer)?;
    }
    // Removing a drawn layer surfaces as a lookup failure at draw time
    tech.layers.retain(|l| l.name != "Si");
    assert!(matches!(
        generate(&tech, &Ring::new(RingParams::default())?),
        Err(LayoutError::Lookup(_))
    ));
    Ok(())
}
