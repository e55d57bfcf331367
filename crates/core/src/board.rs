//! The column set seeded on board creation.

/// A column created automatically with every new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultColumn {
    pub name: &'static str,
    pub color: &'static str,
    pub order: i32,
}

/// The three stages every board starts with, in board order.
pub const DEFAULT_COLUMNS: [DefaultColumn; 3] = [
    DefaultColumn {
        name: "Pendiente",
        color: "#ba181b",
        order: 1,
    },
    DefaultColumn {
        name: "En Progreso",
        color: "#22577a",
        order: 2,
    },
    DefaultColumn {
        name: "Finalizado",
        color: "#80ed99",
        order: 3,
    },
];
