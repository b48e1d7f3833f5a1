use cgmath::{Vector3, vec3};
use serde::Deserialize;

/// Declarative description of one media screen: where it hangs, which way
/// it faces, and the stream behind it.
#[derive(Clone, Debug, Deserialize)]
pub struct ScreenDef {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl ScreenDef {
    pub fn position_vec(&self) -> Vector3<f32> {
        vec3(self.position[0], self.position[1], self.position[2])
    }

    pub fn normal_vec(&self) -> Vector3<f32> {
        vec3(self.normal[0], self.normal[1], self.normal[2])
    }
}

/// Parse a screen layout from JSON, e.g. a file passed on the command line.
pub fn load_screens(json: &str) -> Result<Vec<ScreenDef>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The stock demo layout: screens around the perimeter plus a
/// back-to-back pair on the center divider.
pub fn stock_screens() -> Vec<ScreenDef> {
    fn screen(id: u32, url: &str, position: [f32; 3], normal: [f32; 3]) -> ScreenDef {
        ScreenDef {
            id,
            title: format!("Wall Screen {id}"),
            url: url.to_string(),
            position,
            normal,
        }
    }

    vec![
        screen(1, "/media/1.mp4", [0.0, 1.8, 6.07], [0.0, 0.0, 1.0]),
        screen(2, "/media/2.mp4", [-6.07, 1.8, 0.0], [-1.0, 0.0, 0.0]),
        screen(3, "/media/2.mp4", [-9.93, 1.8, 0.0], [1.0, 0.0, 0.0]),
        screen(4, "/media/2.mp4", [0.0, 1.8, -9.93], [0.0, 0.0, 1.0]),
        screen(5, "/media/2.mp4", [9.93, 1.8, 0.0], [-1.0, 0.0, 0.0]),
        screen(6, "/media/2.mp4", [6.07, 1.8, 0.0], [1.0, 0.0, 0.0]),
        screen(7, "/media/1.mp4", [0.0, 1.8, 5.93], [0.0, 0.0, -1.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_layout_ids_are_unique() {
        let screens = stock_screens();
        let mut ids: Vec<u32> = screens.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), screens.len());
    }

    #[test]
    fn layouts_load_from_json() {
        let json = r#"[
            {
                "id": 12,
                "title": "Lobby Feed",
                "url": "/media/lobby.mp4",
                "position": [0.0, 1.8, -4.0],
                "normal": [0.0, 0.0, 1.0]
            }
        ]"#;

        let screens = load_screens(json).unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].id, 12);
        assert_eq!(screens[0].normal_vec(), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        assert!(load_screens("{\"id\": 1}").is_err());
    }
}
