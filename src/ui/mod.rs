//! On-screen controls in world coordinates
//!
//! The menu button sits in the top-right corner while playing; the pause
//! menu is a column of three items centered on the map.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{MenuAction, Rect};

/// The square button that opens the pause menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuButton {
    pub rect: Rect,
}

impl MenuButton {
    pub fn for_screen(screen_width: f32) -> Self {
        Self {
            rect: Rect::new(
                screen_width - MENU_BUTTON_SIZE,
                0.0,
                MENU_BUTTON_SIZE,
                MENU_BUTTON_SIZE,
            ),
        }
    }

    pub fn hit(&self, point: Vec2) -> bool {
        self.rect.contains_point(point)
    }
}

/// One selectable menu entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub rect: Rect,
}

/// The pause menu layout
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Continue, Restart, Exit stacked top to bottom, centered horizontally
    pub fn for_screen(screen_width: f32) -> Self {
        let x = (screen_width - MENU_ITEM_WIDTH) / 2.0;
        let items = MenuAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| MenuItem {
                action: *action,
                rect: Rect::new(
                    x,
                    MENU_FIRST_ITEM_Y + i as f32 * MENU_ITEM_SPACING,
                    MENU_ITEM_WIDTH,
                    MENU_ITEM_HEIGHT,
                ),
            })
            .collect();
        Self { items }
    }

    /// The action under a click, if any
    pub fn hit(&self, point: Vec2) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.rect.contains_point(point))
            .map(|item| item.action)
    }
}

/// Controls for one session's screen size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub button: MenuButton,
    pub menu: Menu,
}

impl Layout {
    pub fn new(screen_width: f32) -> Self {
        Self {
            button: MenuButton::for_screen(screen_width),
            menu: Menu::for_screen(screen_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_in_top_right_corner() {
        let button = MenuButton::for_screen(800.0);
        assert_eq!(button.rect, Rect::new(750.0, 0.0, 50.0, 50.0));
        assert!(button.hit(Vec2::new(750.0, 0.0)));
        assert!(button.hit(Vec2::new(799.0, 49.0)));
        assert!(!button.hit(Vec2::new(749.0, 10.0)));
        assert!(!button.hit(Vec2::new(775.0, 50.0)));
    }

    #[test]
    fn test_menu_items_layout() {
        let menu = Menu::for_screen(800.0);
        let rects: Vec<Rect> = menu.items.iter().map(|i| i.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(250.0, 100.0, 300.0, 100.0),
                Rect::new(250.0, 250.0, 300.0, 100.0),
                Rect::new(250.0, 400.0, 300.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_menu_hit_testing() {
        let menu = Menu::for_screen(800.0);
        assert_eq!(menu.hit(Vec2::new(250.0, 100.0)), Some(MenuAction::Resume));
        assert_eq!(menu.hit(Vec2::new(400.0, 300.0)), Some(MenuAction::Restart));
        assert_eq!(menu.hit(Vec2::new(549.0, 499.0)), Some(MenuAction::Exit));
        // Gaps between and beside items
        assert_eq!(menu.hit(Vec2::new(400.0, 220.0)), None);
        assert_eq!(menu.hit(Vec2::new(550.0, 150.0)), None);
        assert_eq!(menu.hit(Vec2::new(100.0, 150.0)), None);
    }
}
