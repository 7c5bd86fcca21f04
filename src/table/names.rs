//! Exact table names of the structural export format.

pub const FRAME_SECTION_GENERAL: &str = "FRAME SECTION PROPERTIES 01 - GENERAL";
pub const FRAME_SECTION_NONPRISMATIC: &str = "FRAME SECTION PROPERTIES 05 - NONPRISMATIC";
pub const FRAME_SECTION_POLYGON: &str = "FRAME SECTION PROPERTIES 06 - POLYGON DATA";
pub const SD_SHAPE_POLYGON: &str = "SECTION DESIGNER PROPERTIES 16 - SHAPE POLYGON";
pub const FRAME_SECTION_ASSIGNMENTS: &str = "FRAME SECTION ASSIGNMENTS";
pub const FRAME_END_SKEW_ASSIGNMENTS: &str = "FRAME END SKEW ANGLE ASSIGNMENTS";
pub const AREA_SECTION_PROPERTIES: &str = "AREA SECTION PROPERTIES";
pub const AREA_SECTION_ASSIGNMENTS: &str = "AREA SECTION ASSIGNMENTS";
pub const MATERIAL_GENERAL: &str = "MATERIAL PROPERTIES 01 - GENERAL";
pub const MATERIAL_MECHANICAL: &str = "MATERIAL PROPERTIES 02 - BASIC MECHANICAL PROPERTIES";
