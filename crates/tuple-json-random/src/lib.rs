//! tuple-json-random - random composite value generator.
//!
//! Builds arbitrary mixtures of scalars, sequences, mappings, tuples and
//! numeric arrays for exercising the tuple-json round trip.
//!
//! ```
//! use tuple_json_random::{RandomValue, RandomValueOptions, RootNode};
//!
//! let value = RandomValue::generate_seeded(
//!     RandomValueOptions {
//!         root_node: Some(RootNode::Tuple),
//!         ..Default::default()
//!     },
//!     7,
//! );
//! assert!(value.is_tuple());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tuple_json::{ArrayData, Mapping, NdArray, Value};

/// Containers are not generated below this depth.
const MAX_DEPTH: usize = 8;

/// Element cap of a generated array, whatever `max_array_len` says.
const MAX_ARRAY_ELEMENTS: usize = 4096;

const STRING_CHARS: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Z', '0', '9', ' ', '_', '-', '@', '"', '\\', '/', '\n',
    'é', 'ß', '日', '本', '😀',
];

/// Kind of the root container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootNode {
    Sequence,
    Mapping,
    Tuple,
}

/// Relative weights of node kinds. All zero yields `Null` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeOdds {
    pub null: u32,
    pub boolean: u32,
    pub number: u32,
    pub string: u32,
    pub sequence: u32,
    pub mapping: u32,
    pub tuple: u32,
    pub array: u32,
}

impl Default for NodeOdds {
    fn default() -> Self {
        Self {
            null: 1,
            boolean: 2,
            number: 10,
            string: 8,
            sequence: 2,
            mapping: 2,
            tuple: 2,
            array: 1,
        }
    }
}

impl NodeOdds {
    /// Same odds with numeric arrays switched off. Values generated this way
    /// satisfy the exact round-trip law.
    pub fn without_arrays(self) -> Self {
        Self { array: 0, ..self }
    }
}

#[derive(Debug, Clone)]
pub struct RandomValueOptions {
    /// Root container kind; picked at random when `None`.
    pub root_node: Option<RootNode>,
    /// Approximate number of nodes below the root.
    pub node_count: usize,
    pub odds: NodeOdds,
    pub max_string_len: usize,
    /// Upper bound of every array dimension. Arrays are further capped at
    /// 4096 elements.
    pub max_array_len: usize,
}

impl Default for RandomValueOptions {
    fn default() -> Self {
        Self {
            root_node: None,
            node_count: 32,
            odds: NodeOdds::default(),
            max_string_len: 12,
            max_array_len: 4,
        }
    }
}

/// Random composite value generator.
pub struct RandomValue;

impl RandomValue {
    /// Generates a value from an entropy-seeded RNG.
    pub fn generate(opts: RandomValueOptions) -> Value {
        Self::generate_with_rng(&opts, &mut StdRng::from_entropy())
    }

    /// Generates a value reproducibly from `seed`.
    pub fn generate_seeded(opts: RandomValueOptions, seed: u64) -> Value {
        Self::generate_with_rng(&opts, &mut StdRng::seed_from_u64(seed))
    }

    pub fn generate_with_rng<R: Rng>(opts: &RandomValueOptions, rng: &mut R) -> Value {
        Generator {
            opts,
            rng,
            remaining: opts.node_count,
        }
        .run()
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
    Tuple,
    Array,
}

struct Generator<'a, R: Rng> {
    opts: &'a RandomValueOptions,
    rng: &'a mut R,
    remaining: usize,
}

impl<R: Rng> Generator<'_, R> {
    fn run(mut self) -> Value {
        let root = match self.opts.root_node {
            Some(root) => root,
            None => match self.rng.gen_range(0..3) {
                0 => RootNode::Sequence,
                1 => RootNode::Mapping,
                _ => RootNode::Tuple,
            },
        };
        let mut children = Vec::new();
        while self.remaining > 0 {
            children.push(self.node(1));
        }
        match root {
            RootNode::Sequence => Value::Sequence(children),
            RootNode::Tuple => Value::Tuple(children),
            RootNode::Mapping => Value::Mapping(self.keyed(children)),
        }
    }

    fn node(&mut self, depth: usize) -> Value {
        self.remaining = self.remaining.saturating_sub(1);
        match self.pick_kind(depth) {
            Kind::Null => Value::Null,
            Kind::Boolean => Value::Bool(self.rng.gen()),
            Kind::Number => self.number(),
            Kind::String => Value::String(self.string()),
            Kind::Sequence => Value::Sequence(self.children(depth)),
            Kind::Tuple => Value::Tuple(self.children(depth)),
            Kind::Mapping => {
                let children = self.children(depth);
                Value::Mapping(self.keyed(children))
            }
            Kind::Array => Value::Array(self.array()),
        }
    }

    fn pick_kind(&mut self, depth: usize) -> Kind {
        let odds = self.opts.odds;
        let nest = |weight: u32| if depth < MAX_DEPTH { weight } else { 0 };
        let table = [
            (Kind::Null, odds.null),
            (Kind::Boolean, odds.boolean),
            (Kind::Number, odds.number),
            (Kind::String, odds.string),
            (Kind::Sequence, nest(odds.sequence)),
            (Kind::Mapping, nest(odds.mapping)),
            (Kind::Tuple, nest(odds.tuple)),
            (Kind::Array, odds.array),
        ];
        let total: u32 = table.iter().map(|(_, weight)| weight).sum();
        if total == 0 {
            return Kind::Null;
        }
        let mut roll = self.rng.gen_range(0..total);
        for (kind, weight) in table {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        Kind::Null
    }

    fn children(&mut self, depth: usize) -> Vec<Value> {
        let count = self.rng.gen_range(0..=3usize).min(self.remaining);
        (0..count).map(|_| self.node(depth + 1)).collect()
    }

    fn keyed(&mut self, children: Vec<Value>) -> Mapping {
        let mut map = Mapping::with_capacity(children.len());
        for child in children {
            let key = self.key();
            map.insert(key, child);
        }
        map
    }

    /// Lowercase ASCII only, so a key can never be `@type`.
    fn key(&mut self) -> String {
        let len = self.rng.gen_range(1..=8);
        (0..len)
            .map(|_| char::from(self.rng.gen_range(b'a'..=b'z')))
            .collect()
    }

    fn string(&mut self) -> String {
        let len = self.rng.gen_range(0..=self.opts.max_string_len);
        (0..len)
            .map(|_| STRING_CHARS[self.rng.gen_range(0..STRING_CHARS.len())])
            .collect()
    }

    fn number(&mut self) -> Value {
        if self.rng.gen_bool(0.5) {
            Value::from(self.rng.gen_range(-1_000_000i64..=1_000_000))
        } else {
            Value::from(self.rng.gen_range(-1.0e6..1.0e6))
        }
    }

    fn array(&mut self) -> NdArray {
        let rank = self.rng.gen_range(0..=3);
        let mut shape = Vec::with_capacity(rank);
        // Product of the non-zero axes; each axis is clamped to keep it
        // within MAX_ARRAY_ELEMENTS.
        let mut volume = 1usize;
        for _ in 0..rank {
            let bound = self.opts.max_array_len.min(MAX_ARRAY_ELEMENTS / volume);
            let dim = self.rng.gen_range(0..=bound);
            if dim != 0 {
                volume *= dim;
            }
            shape.push(dim);
        }
        let count = if shape.contains(&0) { 0 } else { volume };
        let data = match self.rng.gen_range(0..4) {
            0 => ArrayData::Bool((0..count).map(|_| self.rng.gen()).collect()),
            1 => ArrayData::Int((0..count).map(|_| self.rng.gen_range(-1000..=1000)).collect()),
            2 => ArrayData::UInt((0..count).map(|_| self.rng.gen_range(0..=u64::MAX)).collect()),
            _ => ArrayData::Float((0..count).map(|_| self.rng.gen_range(-1.0e3..1.0e3)).collect()),
        };
        NdArray::new(shape, data).expect("checked buffer length")
    }
}
