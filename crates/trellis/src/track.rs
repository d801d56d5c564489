use serde::Serialize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Posn {
    pub line: u32,
    pub column: u32
}

impl Posn {
    pub fn origin() -> Posn {
        Posn { line: 0, column: 0 }
    }
}

/// A source region measured in lines and columns, plus the absolute
/// index of the first token covered by the region.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Span {
    pub start: Posn,
    pub end: Posn,
    pub index: u32
}

pub trait Track {
    fn location(&self) -> Option<Span>;
}

impl Track for Span {
    fn location(&self) -> Option<Span> {
        Some(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tracked<T> {
    pub location: Option<Span>,
    pub value: T
}

impl<T> Tracked<T> {
    pub fn map<U, F>(self, op: F) -> Tracked<U>
      where F: FnOnce(T) -> U
    {
        let Tracked { location, value } = self;
        Tracked { location, value: op(value) }
    }
}

impl<T> Track for Tracked<T> {
    fn location(&self) -> Option<Span> {
        self.location
    }
}

pub fn span<T, U>(left: &T, right: &U) -> Option<Span>
  where T: Track,
        U: Track
{
    match (left.location(), right.location()) {
        (Some(l), Some(r)) => Some(Span { start: l.start, end: r.end, index: l.index }),
        _ => None
    }
}
