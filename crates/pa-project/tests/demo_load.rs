use std::path::Path;

#[test]
fn demo_projects_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/projects");
    for name in ["pump_station.yaml"] {
        let path = root.join(name);
        let project = pa_project::load_yaml(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        pa_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        assert!(!project.readings.is_empty());
    }
}
