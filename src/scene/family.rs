//! Naming rules that group metaball objects into families.
//!
//! A family is the object name with any numeric `.NNN` suffix removed, so
//! "Mball", "Mball.001" and "Mball.002" form one family and are merged into
//! one surface. The member whose name does not end in a digit is the basis
//! and owns the surface.

pub fn family_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, num)) if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => base,
        _ => name,
    }
}

pub fn is_basis_name(name: &str) -> bool {
    name.chars()
        .last()
        .is_some_and(|c| !c.is_ascii_digit())
}

/// True when `basis` is the basis of the family `member` belongs to.
pub fn is_basis_for(basis: &str, member: &str) -> bool {
    is_basis_name(basis) && family_name(basis) == family_name(member)
}
