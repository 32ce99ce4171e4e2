pub const HISTORY_CAPACITY: usize = 60;

/// Fixed-capacity ring of samples. Once full, each push overwrites the oldest
/// value, so iteration always yields the most recent `capacity` samples in
/// chronological order.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    buf: Vec<f64>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            head: 0,
            len: 0,
            capacity,
        }
    }

    /// A full ring holding `capacity` copies of `value`.
    pub fn filled(capacity: usize, value: f64) -> Self {
        Self {
            buf: vec![value; capacity],
            head: 0,
            len: capacity,
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() < self.capacity {
            self.buf.push(value);
            self.len += 1;
            return;
        }
        // Full: `head` points at the oldest sample.
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        self.len = self.capacity;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn latest(&self) -> Option<f64> {
        self.iter().last()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (tail, front) = self.buf.split_at(self.head);
        front.iter().chain(tail.iter()).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// CPU, memory and disk utilization histories, appended in lockstep.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    cpu: RollingHistory,
    memory: RollingHistory,
    disk: RollingHistory,
}

impl HistoryStore {
    /// All three histories pre-filled with zeros so the first read already
    /// spans the full chart width.
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            cpu: RollingHistory::filled(capacity, 0.0),
            memory: RollingHistory::filled(capacity, 0.0),
            disk: RollingHistory::filled(capacity, 0.0),
        }
    }

    pub fn record(&mut self, cpu: f64, memory: f64, disk: f64) {
        self.cpu.push(cpu);
        self.memory.push(memory);
        self.disk.push(disk);
    }

    pub fn cpu(&self) -> &RollingHistory {
        &self.cpu
    }

    pub fn memory(&self) -> &RollingHistory {
        &self.memory
    }

    pub fn disk(&self) -> &RollingHistory {
        &self.disk
    }
}
