/// A named key-value namespace inside the resource store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Spritesheet pictures (embedded schema) or cell sizes (indexed schema).
    Spritesheets,
    /// Texture -> picture bindings.
    Textures,
    /// Compressed pictures.
    Pictures,
    /// Assembled animation records.
    Animations,
    /// Tag -> animation names.
    Tags,
}

impl Bucket {
    /// All buckets, in the order they are listed by tools.
    pub const ALL: [Bucket; 5] = [
        Bucket::Spritesheets,
        Bucket::Textures,
        Bucket::Pictures,
        Bucket::Animations,
        Bucket::Tags,
    ];

    /// Database name inside the store file.
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::Spritesheets => "spritesheets",
            Bucket::Textures => "textures",
            Bucket::Pictures => "pictures",
            Bucket::Animations => "animations",
            Bucket::Tags => "tags",
        }
    }

    /// Looks a bucket up by its database name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.name() == name)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bucket::from_name(s).ok_or_else(|| {
            let names: Vec<_> = Bucket::ALL.iter().map(Bucket::name).collect();
            format!("unknown bucket '{}' (expected one of: {})", s, names.join(", "))
        })
    }
}
